//! Media domain - record mutations and the payloads they send

pub mod mutation;
pub mod payload;

pub use self::mutation::MutationCoordinator;
pub use self::payload::{ImageSlot, ImageSource, RecordDraft, RecordPatch};
