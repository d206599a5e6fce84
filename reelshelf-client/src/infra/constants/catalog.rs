//! Tunables for the incremental catalog view.

/// Listing page size is fixed by the backend contract.
pub use reelshelf_model::PAGE_SIZE;

pub mod search {
    use std::time::Duration;

    /// Quiet window before a free-text edit becomes a new query
    pub const DEBOUNCE_MS: u64 = 300;

    pub const DEBOUNCE: Duration = Duration::from_millis(DEBOUNCE_MS);
}

pub mod virtual_list {
    /// Remaining scroll distance below which the next page is requested
    pub const LOAD_MORE_THRESHOLD: f32 = 100.0;
    /// Rows rendered above and below the viewport
    pub const OVERSCAN_ROWS: usize = 5;
    /// Size assumed for a row until it has been measured
    pub const ESTIMATED_ROW_HEIGHT: f32 = 33.0;
    /// Viewport height assumed before the view reports one
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}

pub mod feedback {
    use std::time::Duration;

    /// Success and error toasts dismiss themselves after this long
    pub const TOAST_TTL: Duration = Duration::from_secs(3);
}
