use crate::infra::constants::virtual_list::LOAD_MORE_THRESHOLD;

/// Geometry of the scrollable table body as reported by the view
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Distance left to scroll before the bottom edge is reached
    pub fn remaining(&self) -> f32 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Decides when scrolling close to the bottom should pull the next page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLoader {
    threshold: f32,
}

impl Default for ScrollLoader {
    fn default() -> Self {
        Self::new(LOAD_MORE_THRESHOLD)
    }
}

impl ScrollLoader {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// True when the next page should be requested.
    ///
    /// Never fires while a fetch is in flight, so any burst of scroll events
    /// shorter than one round trip yields a single request.
    pub fn should_load(&self, metrics: ScrollMetrics, fetch_in_flight: bool, has_next: bool) -> bool {
        has_next && !fetch_in_flight && metrics.remaining() < self.threshold
    }
}
