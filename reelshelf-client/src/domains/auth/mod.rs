//! Authentication domain
//!
//! Login and registration against the backend, plus the [`Session`] value
//! every other domain receives explicitly instead of reading global state.

pub mod service;
pub mod session;

pub use service::AuthService;
pub use session::Session;
