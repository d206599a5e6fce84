//! Error taxonomy for the catalog client.
//!
//! Two families reach callers: [`NetworkError`] for anything the transport or
//! the server rejected, and [`ValidationError`] for preconditions checked
//! before a request is built. Both are `Clone` so they can travel inside view
//! events and snapshots.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("server responded {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl NetworkError {
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        if err.is_decode() {
            NetworkError::Decode {
                url,
                message: err.to_string(),
            }
        } else {
            NetworkError::Transport {
                url,
                message: err.to_string(),
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("failed to encode image {name}: {reason}")]
    Encoding { name: String, reason: String },
}

impl ValidationError {
    /// Form field the error belongs to, for inline reporting.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidField { field, .. } => field,
            ValidationError::Encoding { .. } => "images",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.into())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
