use std::time::Duration;

use reelshelf_model::{MediaKind, Page, QuerySignature, RecordId, SortSpec};

use crate::domains::catalog::loader::ScrollMetrics;
use crate::error::NetworkError;

/// Inputs to the catalog view, from the frontend or from finished effects
#[derive(Clone)]
pub enum CatalogEvent {
    /// Free-text search box changed
    SearchInput(String),
    /// A debounce timer started for `generation` has fired
    DebounceElapsed { generation: u64 },
    SetType(Option<MediaKind>),
    SetYear(Option<i32>),
    SetDirector(Option<String>),
    ResetFilters,

    /// The scroll container was mounted
    Attached(ScrollMetrics),
    Scrolled(ScrollMetrics),
    Resized { viewport_height: f32 },
    /// A rendered row reported its real height
    RowMeasured { id: RecordId, size: f32 },

    /// Result of a fetch issued under `token`
    PageLoaded {
        token: u64,
        signature: QuerySignature,
        page: u32,
        result: Result<Page, NetworkError>,
    },
    SortChanged(Option<SortSpec>),

    /// Cached pages no longer reflect the server
    Invalidate,
    /// Resume pagination after a failed fetch
    Retry,
    SelectRecord(RecordId),
}

impl CatalogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchInput(_) => "Catalog::SearchInput",
            Self::DebounceElapsed { .. } => "Catalog::DebounceElapsed",
            Self::SetType(_) => "Catalog::SetType",
            Self::SetYear(_) => "Catalog::SetYear",
            Self::SetDirector(_) => "Catalog::SetDirector",
            Self::ResetFilters => "Catalog::ResetFilters",
            Self::Attached(_) => "Catalog::Attached",
            Self::Scrolled(_) => "Catalog::Scrolled",
            Self::Resized { .. } => "Catalog::Resized",
            Self::RowMeasured { .. } => "Catalog::RowMeasured",
            Self::PageLoaded { .. } => "Catalog::PageLoaded",
            Self::SortChanged(_) => "Catalog::SortChanged",
            Self::Invalidate => "Catalog::Invalidate",
            Self::Retry => "Catalog::Retry",
            Self::SelectRecord(_) => "Catalog::SelectRecord",
        }
    }
}

impl std::fmt::Debug for CatalogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchInput(text) => write!(f, "Catalog::SearchInput({text:?})"),
            Self::DebounceElapsed { generation } => {
                write!(f, "Catalog::DebounceElapsed({generation})")
            }
            Self::PageLoaded {
                token,
                page,
                result,
                ..
            } => match result {
                Ok(loaded) => write!(
                    f,
                    "Catalog::PageLoaded(token={token}, page={page}, {} records)",
                    loaded.records.len()
                ),
                Err(err) => write!(f, "Catalog::PageLoaded(token={token}, page={page}, {err})"),
            },
            Self::RowMeasured { id, size } => write!(f, "Catalog::RowMeasured({id}, {size})"),
            Self::SelectRecord(id) => write!(f, "Catalog::SelectRecord({id})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Side effects the view asks its driver to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPage {
        token: u64,
        signature: QuerySignature,
        page: u32,
    },
    StartDebounce { generation: u64, delay: Duration },
    /// Outward navigation to a record's detail view
    Navigate(RecordId),
    /// Move the scroll container to this offset
    ScrollTo(f32),
}
