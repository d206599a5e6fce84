use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidRecord(String),
    UnknownMediaKind(String),
    UnknownSortColumn(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidRecord(msg) => write!(f, "invalid record: {msg}"),
            ModelError::UnknownMediaKind(raw) => {
                write!(f, "unknown media type: {raw:?} (expected MOVIE or TV_SHOW)")
            }
            ModelError::UnknownSortColumn(raw) => {
                write!(f, "unknown sort column: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
