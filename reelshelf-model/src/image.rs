use crate::ids::{ImageId, RecordId};
use chrono::{DateTime, Utc};

/// An uploaded image owned by a single record, either as its poster or as a
/// gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImageRef {
    pub id: ImageId,
    pub url: String,
    /// Owning record, when the server includes the back reference
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "showId", skip_serializing_if = "Option::is_none")
    )]
    pub record_id: Option<RecordId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ImageRef {
    pub fn new(id: ImageId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            record_id: None,
            created_at: None,
            updated_at: None,
        }
    }
}
