//! Test doubles shared by unit and integration tests
//!
//! Compiled into the library so `tests/` can use them; nothing in the
//! production paths depends on this module.

pub mod fixtures;
pub mod stubs;

pub use stubs::{FetchCall, TestCatalogApi};
