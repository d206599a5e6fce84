//! State owned by the incremental catalog view.

use std::time::Duration;

use reelshelf_model::{QuerySignature, Record, SortSpec};

use crate::domains::catalog::aggregator::PageCache;
use crate::domains::catalog::facets::{Facets, derive_facets};
use crate::domains::catalog::loader::{ScrollLoader, ScrollMetrics};
use crate::domains::search::SearchDebouncer;
use crate::domains::ui::virtual_list::{VirtualListState, VirtualRow};
use crate::error::NetworkError;
use crate::infra::config::ClientConfig;
use crate::infra::constants::search::DEBOUNCE;
use crate::infra::constants::virtual_list::{
    DEFAULT_VIEWPORT_HEIGHT, ESTIMATED_ROW_HEIGHT, LOAD_MORE_THRESHOLD, OVERSCAN_ROWS,
};

/// Tunables for a view instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub debounce: Duration,
    pub scroll_threshold: f32,
    pub overscan_rows: usize,
    pub estimated_row_height: f32,
    pub viewport_height: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE,
            scroll_threshold: LOAD_MORE_THRESHOLD,
            overscan_rows: OVERSCAN_ROWS,
            estimated_row_height: ESTIMATED_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl From<&ClientConfig> for ViewSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            debounce: config.debounce(),
            scroll_threshold: config.scroll_threshold,
            overscan_rows: config.overscan_rows,
            estimated_row_height: config.estimated_row_height,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Fetch lifecycle for the active signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading { token: u64, page: u32 },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }
}

/// Read-only copy of the view handed to renderers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub signature: QuerySignature,
    /// What is in the search box, possibly not yet applied
    pub search_input: String,
    /// Every loaded record in display order
    pub rows: Vec<Record>,
    pub facets: Facets,
    pub sort: Option<SortSpec>,
    pub loading: bool,
    pub has_next_page: bool,
    pub current_page: u32,
    pub total_pages: Option<u32>,
    pub error: Option<NetworkError>,
    pub scroll_top: f32,
    pub total_height: f32,
    pub viewport_height: f32,
    pub visible: Vec<VirtualRow>,
    pub padding_before: f32,
    pub padding_after: f32,
}

impl CatalogSnapshot {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scroll metrics that put the viewport at the very bottom
    pub fn bottom_metrics(&self) -> ScrollMetrics {
        let top = (self.total_height - self.viewport_height).max(0.0);
        ScrollMetrics::new(top, self.total_height, self.viewport_height)
    }
}

/// The incremental catalog view.
///
/// Pure state machine: [`CatalogView::update`] consumes one event and returns
/// the effects a driver must run. No I/O happens here.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub(super) signature: QuerySignature,
    pub(super) search: SearchDebouncer,
    pub(super) cache: PageCache,
    pub(super) fetch: FetchState,
    /// Bumped on every reset; responses issued under older tokens are dropped
    pub(super) token: u64,
    pub(super) error: Option<NetworkError>,
    pub(super) facets: Facets,
    pub(super) sort: Option<SortSpec>,
    /// Display order as indices into the cache's records
    pub(super) order: Vec<usize>,
    pub(super) loader: ScrollLoader,
    pub(super) list: VirtualListState,
    pub(super) metrics: Option<ScrollMetrics>,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}

impl CatalogView {
    pub fn new(settings: ViewSettings) -> Self {
        let mut list = VirtualListState::new(settings.estimated_row_height, settings.overscan_rows);
        list.viewport_height = settings.viewport_height;
        Self {
            signature: QuerySignature::default(),
            search: SearchDebouncer::new(settings.debounce),
            cache: PageCache::new(QuerySignature::default()),
            fetch: FetchState::Idle,
            token: 0,
            error: None,
            facets: Facets::default(),
            sort: None,
            order: Vec::new(),
            loader: ScrollLoader::new(settings.scroll_threshold),
            list,
            metrics: None,
        }
    }

    /// Start with filters already applied; nothing is fetched until the
    /// view is attached.
    pub fn with_signature(settings: ViewSettings, signature: QuerySignature) -> Self {
        let mut view = Self::new(settings);
        view.search.commit_now(signature.search_text.clone());
        view.cache.reset_to(signature.clone());
        view.signature = signature;
        view
    }

    pub fn signature(&self) -> &QuerySignature {
        &self.signature
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn error(&self) -> Option<&NetworkError> {
        self.error.as_ref()
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn has_next_page(&self) -> bool {
        self.cache.has_next_page()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn list(&self) -> &VirtualListState {
        &self.list
    }

    /// Loaded records in display order
    pub fn rows(&self) -> impl Iterator<Item = &Record> + '_ {
        let records = self.cache.records();
        self.order.iter().map(move |&i| &records[i])
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            signature: self.signature.clone(),
            search_input: self
                .search
                .pending()
                .unwrap_or(self.search.committed())
                .to_string(),
            rows: self.rows().cloned().collect(),
            facets: self.facets.clone(),
            sort: self.sort,
            loading: self.fetch.is_loading(),
            has_next_page: self.cache.has_next_page(),
            current_page: self.cache.current_page(),
            total_pages: self.cache.total_pages(),
            error: self.error.clone(),
            scroll_top: self.list.scroll_position,
            total_height: self.list.total_height(),
            viewport_height: self.list.viewport_height,
            visible: self.list.visible_rows(),
            padding_before: self.list.padding_before(),
            padding_after: self.list.padding_after(),
        }
    }

    /// Recompute everything derived from the aggregated list
    pub(super) fn refresh_derived(&mut self) {
        let records = self.cache.records();
        self.facets = derive_facets(records);
        self.order = match &self.sort {
            Some(spec) => spec.sorted_indices(records),
            None => (0..records.len()).collect(),
        };
        let keys = self.order.iter().map(|&i| records[i].id).collect();
        self.list.set_rows(keys);
    }
}
