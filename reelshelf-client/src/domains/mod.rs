//! Domain modules for the Reelshelf client
//!
//! Each domain owns its state and exposes operations; domains talk to each
//! other only through [`crate::common::messages::CrossDomainEvent`].

pub mod auth;
pub mod catalog;
pub mod media;
pub mod search;
pub mod ui;
