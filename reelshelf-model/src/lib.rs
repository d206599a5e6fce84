//! Core data model definitions shared across Reelshelf crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod filter_types;
pub mod ids;
pub mod image;
pub mod media;
pub mod media_type;
pub mod page;
pub mod sorting;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use filter_types::QuerySignature;
pub use ids::{ImageId, RecordId};
pub use image::ImageRef;
pub use media::Record;
pub use media_type::MediaKind;
pub use page::{PAGE_SIZE, Page};
pub use sorting::{SortColumn, SortDirection, SortSpec};
