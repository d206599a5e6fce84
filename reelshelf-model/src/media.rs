use chrono::{DateTime, Utc};

use crate::ids::{ImageId, RecordId};
use crate::image::ImageRef;
use crate::media_type::MediaKind;

/// A catalog entry as returned by the backend.
///
/// Identity is [`Record::id`]; every other field is presentation data. The
/// wire format uses camelCase with a few renamed fields (`type`, `duration`,
/// `images`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub director: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub release_year: i32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub media_type: MediaKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub budget: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub location: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "duration", skip_serializing_if = "Option::is_none")
    )]
    pub duration_minutes: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub poster_id: Option<ImageId>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub poster: Option<ImageRef>,
    #[cfg_attr(feature = "serde", serde(default, rename = "images"))]
    pub gallery: Vec<ImageRef>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Minimal record with the required columns filled in.
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        director: impl Into<String>,
        release_year: i32,
        media_type: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            director: director.into(),
            release_year,
            media_type,
            description: None,
            budget: None,
            location: None,
            duration_minutes: None,
            poster_id: None,
            poster: None,
            gallery: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_poster(mut self, poster: ImageRef) -> Self {
        self.poster_id = Some(poster.id);
        self.poster = Some(poster);
        self
    }

    pub fn poster_url(&self) -> Option<&str> {
        self.poster.as_ref().map(|p| p.url.as_str())
    }

    /// Director name with surrounding whitespace removed, `None` when blank.
    pub fn director_facet(&self) -> Option<&str> {
        let trimmed = self.director.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Release year, `None` when the server left it unset (zero).
    pub fn year_facet(&self) -> Option<i32> {
        (self.release_year != 0).then_some(self.release_year)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "id": 7,
            "title": "The Matrix",
            "description": null,
            "releaseYear": 1999,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z",
            "type": "MOVIE",
            "director": "Lana Wachowski",
            "budget": 63000000,
            "location": "Sydney",
            "duration": 136,
            "posterId": 3,
            "poster": {"id": 3, "url": "https://cdn/p.jpg", "showId": 7},
            "images": [{"id": 4, "url": "https://cdn/g1.jpg", "showId": 7}]
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId(7));
        assert_eq!(record.media_type, MediaKind::Movie);
        assert_eq!(record.duration_minutes, Some(136));
        assert_eq!(record.poster_url(), Some("https://cdn/p.jpg"));
        assert_eq!(record.gallery.len(), 1);
        assert_eq!(record.gallery[0].record_id, Some(RecordId(7)));
        assert!(record.description.is_none());
    }

    #[test]
    fn blank_facets_are_absent() {
        let record = Record::new(1, "Untitled", "   ", 0, MediaKind::TvShow);
        assert_eq!(record.director_facet(), None);
        assert_eq!(record.year_facet(), None);
    }
}
