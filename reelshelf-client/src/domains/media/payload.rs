//! Create and edit payloads for catalog records.
//!
//! Image attachments are sent inline as `data:` URLs. Every attachment is
//! encoded before the request body exists; one failed encoding fails the
//! whole build.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;
use image::ImageFormat;

use reelshelf_model::{ImageRef, MediaKind, RecordId};

use crate::error::ValidationError;
use crate::infra::api_types::{CreateRecordBody, UpdateRecordBody};

/// An image the user picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageSource::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        ImageSource::Bytes {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }

    /// Read (if needed) and encode as a `data:<mime>;base64,` URL.
    pub async fn to_data_url(&self) -> Result<String, ValidationError> {
        let (bytes, hint) = match self {
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|err| {
                    ValidationError::Encoding {
                        name: self.name(),
                        reason: err.to_string(),
                    }
                })?;
                (bytes, Some(path.as_path()))
            }
            ImageSource::Bytes { name, bytes } => (bytes.clone(), Some(Path::new(name.as_str()))),
        };
        encode_data_url(&self.name(), &bytes, hint)
    }
}

fn encode_data_url(
    name: &str,
    bytes: &[u8],
    hint: Option<&Path>,
) -> Result<String, ValidationError> {
    if bytes.is_empty() {
        return Err(ValidationError::Encoding {
            name: name.to_string(),
            reason: "file is empty".to_string(),
        });
    }
    let format = image::guess_format(bytes)
        .ok()
        .or_else(|| hint.and_then(|p| ImageFormat::from_path(p).ok()))
        .ok_or_else(|| ValidationError::Encoding {
            name: name.to_string(),
            reason: "not a recognised image format".to_string(),
        })?;

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Encode all sources concurrently, preserving order.
pub async fn encode_all(sources: &[ImageSource]) -> Result<Vec<String>, ValidationError> {
    try_join_all(sources.iter().map(ImageSource::to_data_url)).await
}

/// Image slot on an edit form: keep what the server has, or upload new
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSlot {
    Keep(ImageRef),
    Upload(ImageSource),
}

impl ImageSlot {
    async fn resolve(&self) -> Result<String, ValidationError> {
        match self {
            ImageSlot::Keep(image) => Ok(image.url.clone()),
            ImageSlot::Upload(source) => source.to_data_url().await,
        }
    }
}

/// Input for creating a record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub media_type: MediaKind,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub duration_minutes: Option<u32>,
    pub poster: Option<ImageSource>,
    pub gallery: Vec<ImageSource>,
}

impl RecordDraft {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        release_year: i32,
        media_type: MediaKind,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            release_year,
            media_type,
            description: None,
            budget: None,
            location: None,
            duration_minutes: None,
            poster: None,
            gallery: Vec::new(),
        }
    }

    pub fn with_poster(mut self, poster: ImageSource) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Required-field checks, first failure wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("director", &self.director)?;
        require_year(self.release_year)?;
        if self.poster.is_none() {
            return Err(ValidationError::MissingField { field: "poster" });
        }
        if let Some(budget) = self.budget {
            require_non_negative("budget", budget)?;
        }
        Ok(())
    }

    /// Validate, then encode every attachment into the request body.
    pub async fn into_body(self) -> Result<CreateRecordBody, ValidationError> {
        self.validate()?;
        let poster = match &self.poster {
            Some(poster) => poster.to_data_url().await?,
            None => return Err(ValidationError::MissingField { field: "poster" }),
        };
        let images = encode_all(&self.gallery).await?;

        Ok(CreateRecordBody {
            title: self.title.trim().to_string(),
            director: self.director.trim().to_string(),
            release_year: self.release_year,
            media_type: self.media_type,
            description: self.description.unwrap_or_default(),
            poster,
            images,
            budget: self.budget,
            location: self.location.unwrap_or_default(),
            duration_minutes: self.duration_minutes,
        })
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
    pub media_type: Option<MediaKind>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub duration_minutes: Option<u32>,
    pub poster: Option<ImageSlot>,
    /// Full replacement gallery, in display order
    pub gallery: Option<Vec<ImageSlot>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }

    pub fn validate(&self, id: RecordId) -> Result<(), ValidationError> {
        if !id.is_valid() {
            return Err(ValidationError::InvalidField {
                field: "id",
                reason: format!("{} is not a record id", id),
            });
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(director) = &self.director {
            require_text("director", director)?;
        }
        if let Some(year) = self.release_year {
            require_year(year)?;
        }
        if let Some(budget) = self.budget {
            require_non_negative("budget", budget)?;
        }
        Ok(())
    }

    /// Validate, then encode new attachments; kept images pass their URL.
    pub async fn into_body(self, id: RecordId) -> Result<UpdateRecordBody, ValidationError> {
        self.validate(id)?;
        let poster = match &self.poster {
            Some(slot) => Some(slot.resolve().await?),
            None => None,
        };
        let images = match &self.gallery {
            Some(slots) => Some(try_join_all(slots.iter().map(ImageSlot::resolve)).await?),
            None => None,
        };

        Ok(UpdateRecordBody {
            id,
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            release_year: self.release_year,
            media_type: self.media_type,
            director: self.director.map(|d| d.trim().to_string()),
            budget: self.budget,
            location: self.location,
            duration_minutes: self.duration_minutes,
            poster,
            images,
        })
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

fn require_year(year: i32) -> Result<(), ValidationError> {
    if year <= 0 {
        Err(ValidationError::InvalidField {
            field: "releaseYear",
            reason: format!("{year} is not a valid year"),
        })
    } else {
        Ok(())
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidField {
            field,
            reason: format!("{value} must be a non-negative number"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelshelf_model::ImageId;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn png() -> ImageSource {
        ImageSource::bytes("poster.png", PNG_MAGIC)
    }

    #[tokio::test]
    async fn bytes_encode_to_png_data_url() {
        let url = png().to_data_url().await.unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(
            url.trim_start_matches("data:image/png;base64,"),
            STANDARD.encode(PNG_MAGIC)
        );
    }

    #[tokio::test]
    async fn unreadable_file_is_an_encoding_error() {
        let err = ImageSource::path("/definitely/not/here.png")
            .to_data_url()
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::Encoding { .. }));
    }

    #[tokio::test]
    async fn unknown_bytes_are_rejected() {
        let err = ImageSource::bytes("notes.txt", b"hello".to_vec())
            .to_data_url()
            .await
            .unwrap_err();
        assert_eq!(err.field(), "images");
    }

    #[test]
    fn draft_requires_title_director_year_and_poster() {
        let draft = RecordDraft::new("", "Nolan", 2010, MediaKind::Movie);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "title" })
        );

        let draft = RecordDraft::new("Inception", "  ", 2010, MediaKind::Movie);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "director" })
        );

        let draft = RecordDraft::new("Inception", "Nolan", 0, MediaKind::Movie);
        assert_eq!(draft.validate().unwrap_err().field(), "releaseYear");

        let draft = RecordDraft::new("Inception", "Nolan", 2010, MediaKind::Movie);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField { field: "poster" })
        );
        assert!(draft.with_poster(png()).validate().is_ok());
    }

    #[tokio::test]
    async fn draft_body_encodes_poster_and_gallery_in_order() {
        let mut draft = RecordDraft::new(" Inception ", "Nolan", 2010, MediaKind::Movie)
            .with_poster(png());
        draft.gallery = vec![png(), png()];

        let body = draft.into_body().await.unwrap();
        assert_eq!(body.title, "Inception");
        assert!(body.poster.starts_with("data:image/png"));
        assert_eq!(body.images.len(), 2);
    }

    #[tokio::test]
    async fn one_bad_gallery_image_aborts_the_build() {
        let mut draft =
            RecordDraft::new("Inception", "Nolan", 2010, MediaKind::Movie).with_poster(png());
        draft.gallery = vec![png(), ImageSource::bytes("x.bin", vec![1, 2, 3])];
        assert!(draft.into_body().await.is_err());
    }

    #[tokio::test]
    async fn patch_keeps_existing_urls_and_encodes_new_files() {
        let kept = ImageRef::new(ImageId(9), "http://cdn/kept.jpg");
        let patch = RecordPatch {
            title: Some("New title".into()),
            poster: Some(ImageSlot::Keep(kept.clone())),
            gallery: Some(vec![ImageSlot::Keep(kept), ImageSlot::Upload(png())]),
            ..RecordPatch::default()
        };

        let body = patch.into_body(RecordId(4)).await.unwrap();
        assert_eq!(body.id, RecordId(4));
        assert_eq!(body.poster.as_deref(), Some("http://cdn/kept.jpg"));
        let images = body.images.unwrap();
        assert_eq!(images[0], "http://cdn/kept.jpg");
        assert!(images[1].starts_with("data:image/png;base64,"));
        assert_eq!(body.director, None);
    }

    #[test]
    fn patch_rejects_invalid_id_and_blank_fields() {
        assert!(RecordPatch::default().validate(RecordId(0)).is_err());
        let patch = RecordPatch {
            director: Some(" ".into()),
            ..RecordPatch::default()
        };
        assert_eq!(
            patch.validate(RecordId(1)),
            Err(ValidationError::MissingField { field: "director" })
        );
    }
}
