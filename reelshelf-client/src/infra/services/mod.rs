//! Service abstractions over the backend

pub mod api;

pub use api::{CatalogApi, listing_query};
