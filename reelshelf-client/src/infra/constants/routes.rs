//! API route constants for the catalog backend
//!
//! Paths are relative to the configured server URL.

/// Authentication endpoints
pub mod auth {
    /// User registration
    pub const REGISTER: &str = "/auth/register";
    /// User login
    pub const LOGIN: &str = "/auth/login";
}

/// Catalog record endpoints
pub mod movies {
    /// Paged listing, create
    pub const COLLECTION: &str = "/movies";

    /// Single record: fetch, update, delete
    pub fn item(id: impl std::fmt::Display) -> String {
        format!("/movies/{id}")
    }
}
