pub mod catalog;

pub use catalog::{FetchCall, TestCatalogApi};
