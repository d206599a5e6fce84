//! Infrastructure: HTTP client, wire types, configuration and test doubles

pub mod api_client;
pub mod api_types;
pub mod config;
pub mod constants;
pub mod services;
pub mod testing;
