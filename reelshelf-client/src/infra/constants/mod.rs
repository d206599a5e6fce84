//! Constants module for centralized configuration values

pub mod catalog;
pub mod routes;

// Re-export commonly used items
pub use catalog::{feedback, search, virtual_list};
