//! Reelshelf client library
//!
//! An incremental, paged view over a remote media catalog plus the REST
//! client, mutation flows and command line driver built around it.
//!
//! Notes
//! - [`domains::catalog::CatalogView`] is a pure state machine; drive it
//!   with [`domains::catalog::CatalogRuntime`] or feed it events directly.
//! - `infra::testing` holds the in-memory backend used by the test suite.

pub mod app;
pub mod common;
pub mod domains;
pub mod error;
pub mod infra;

pub use error::{CatalogError, CatalogResult, NetworkError, ValidationError};
