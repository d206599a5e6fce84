use log::{debug, info, warn};
use reelshelf_model::{Page, QuerySignature};

use crate::domains::catalog::aggregator::AppendOutcome;
use crate::domains::catalog::loader::ScrollMetrics;
use crate::domains::catalog::messages::{CatalogEvent, Effect};
use crate::domains::catalog::state::{CatalogView, FetchState};
use crate::error::NetworkError;

impl CatalogView {
    /// Apply one event and return the effects to run.
    pub fn update(&mut self, event: CatalogEvent) -> Vec<Effect> {
        log::trace!("[Catalog] {:?}", event);

        match event {
            CatalogEvent::SearchInput(text) => {
                let ticket = self.search.input(text);
                vec![Effect::StartDebounce {
                    generation: ticket.generation,
                    delay: ticket.delay,
                }]
            }

            CatalogEvent::DebounceElapsed { generation } => match self.search.elapsed(generation) {
                Some(text) => {
                    let next = self.signature.clone().with_search(text);
                    self.set_signature(next)
                }
                None => Vec::new(),
            },

            CatalogEvent::SetType(kind) => {
                let next = self.signature.clone().with_type(kind);
                self.set_signature(next)
            }

            CatalogEvent::SetYear(year) => {
                let next = self.signature.clone().with_year(year);
                self.set_signature(next)
            }

            CatalogEvent::SetDirector(director) => {
                let next = self.signature.clone().with_director(director);
                self.set_signature(next)
            }

            CatalogEvent::ResetFilters => {
                self.search.commit_now("");
                self.set_signature(QuerySignature::default())
            }

            CatalogEvent::Attached(metrics) | CatalogEvent::Scrolled(metrics) => {
                self.list
                    .update_scroll(metrics.scroll_top, metrics.client_height);
                self.metrics = Some(metrics);
                self.maybe_load(metrics).into_iter().collect()
            }

            CatalogEvent::Resized { viewport_height } => {
                self.list.resize(viewport_height);
                let metrics = self.current_metrics();
                self.metrics = Some(metrics);
                self.maybe_load(metrics).into_iter().collect()
            }

            CatalogEvent::RowMeasured { id, size } => {
                let adjustment = self.list.measure(id, size);
                if adjustment != 0.0 {
                    vec![Effect::ScrollTo(self.list.scroll_position)]
                } else {
                    Vec::new()
                }
            }

            CatalogEvent::PageLoaded {
                token,
                signature,
                page,
                result,
            } => self.handle_page_loaded(token, signature, page, result),

            CatalogEvent::SortChanged(sort) => {
                if self.sort == sort {
                    return Vec::new();
                }
                // Loading is untouched: sorting is applied over whatever is
                // aggregated, including a page still in flight.
                self.sort = sort;
                self.refresh_derived();
                if self.list.total_items() > 0 {
                    self.list.scroll_to_index(0);
                }
                vec![Effect::ScrollTo(self.list.scroll_position)]
            }

            CatalogEvent::Invalidate => {
                info!("[Catalog] invalidated, reloading from page 1");
                let signature = self.signature.clone();
                self.reset(signature)
            }

            CatalogEvent::Retry => {
                if self.error.take().is_none() || self.fetch.is_loading() {
                    return Vec::new();
                }
                if !self.cache.has_next_page() {
                    return Vec::new();
                }
                vec![self.request_next_page()]
            }

            CatalogEvent::SelectRecord(id) => vec![Effect::Navigate(id)],
        }
    }

    fn set_signature(&mut self, next: QuerySignature) -> Vec<Effect> {
        if next == self.signature {
            return Vec::new();
        }
        debug!("[Catalog] signature changed to {}", next);
        self.reset(next)
    }

    /// Empty the list for `signature` and request its first page
    fn reset(&mut self, signature: QuerySignature) -> Vec<Effect> {
        self.token += 1;
        self.signature = signature.clone();
        self.cache.reset_to(signature);
        self.error = None;
        self.fetch = FetchState::Idle;
        self.refresh_derived();
        self.list.prune_measurements();
        self.list.scroll_to_index(0);

        vec![Effect::ScrollTo(0.0), self.request_next_page()]
    }

    fn request_next_page(&mut self) -> Effect {
        let page = self.cache.next_page();
        self.fetch = FetchState::Loading {
            token: self.token,
            page,
        };
        debug!("[Catalog] requesting page {} ({})", page, self.signature);
        Effect::FetchPage {
            token: self.token,
            signature: self.signature.clone(),
            page,
        }
    }

    fn maybe_load(&mut self, metrics: ScrollMetrics) -> Option<Effect> {
        if self.error.is_some() {
            return None;
        }
        self.loader
            .should_load(metrics, self.fetch.is_loading(), self.cache.has_next_page())
            .then(|| self.request_next_page())
    }

    /// Metrics as the view would report them after the list changed
    fn current_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.list.scroll_position,
            self.list.total_height(),
            self.list.viewport_height,
        )
    }

    fn handle_page_loaded(
        &mut self,
        token: u64,
        signature: QuerySignature,
        page: u32,
        result: Result<Page, NetworkError>,
    ) -> Vec<Effect> {
        let expected = FetchState::Loading {
            token: self.token,
            page,
        };
        if token != self.token || self.fetch != expected {
            debug!(
                "[Catalog] discarding page {} issued under token {} (current {})",
                page, token, self.token
            );
            return Vec::new();
        }
        self.fetch = FetchState::Idle;

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("[Catalog] page {} failed: {}", page, err);
                self.error = Some(err);
                return Vec::new();
            }
        };

        match self.cache.append(&signature, loaded) {
            AppendOutcome::Appended { added, .. } => {
                debug!(
                    "[Catalog] page {} added {} records, {} loaded",
                    page,
                    added,
                    self.cache.len()
                );
                self.refresh_derived();
            }
            outcome => {
                warn!("[Catalog] page {} not applied: {:?}", page, outcome);
                return Vec::new();
            }
        }

        // An under-filled viewport keeps pulling pages until it has content
        // to scroll or the server runs out.
        match self.metrics {
            Some(_) => {
                let metrics = self.current_metrics();
                self.metrics = Some(metrics);
                self.maybe_load(metrics).into_iter().collect()
            }
            None => Vec::new(),
        }
    }
}
