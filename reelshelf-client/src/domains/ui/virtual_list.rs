//! Windowed rendering math for the catalog table.
//!
//! Rows start out with an estimated height; once the view reports a real
//! height for a row it replaces the estimate. Measurements are keyed by record
//! id so they survive re-sorting.

use std::collections::HashMap;
use std::ops::Range;

use reelshelf_model::RecordId;

use crate::infra::constants::virtual_list::{
    DEFAULT_VIEWPORT_HEIGHT, ESTIMATED_ROW_HEIGHT, OVERSCAN_ROWS,
};

/// One row the view should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualRow {
    pub index: usize,
    pub key: RecordId,
    pub start: f32,
    pub size: f32,
}

/// Virtual list state for efficient rendering of large lists
#[derive(Debug, Clone)]
pub struct VirtualListState {
    /// Row keys in display order
    keys: Vec<RecordId>,
    /// Real heights reported by the view
    measured: HashMap<RecordId, f32>,
    /// `offsets[i]` is the start of row `i`; `offsets[len]` is the total height
    offsets: Vec<f32>,
    /// Height assumed for rows that have not been measured
    pub estimated_item_height: f32,
    /// Current scroll position
    pub scroll_position: f32,
    /// Viewport height
    pub viewport_height: f32,
    /// Number of rows to render outside viewport (for smooth scrolling)
    pub overscan: usize,
    /// Currently visible range
    pub visible_range: Range<usize>,
}

impl Default for VirtualListState {
    fn default() -> Self {
        Self::new(ESTIMATED_ROW_HEIGHT, OVERSCAN_ROWS)
    }
}

impl VirtualListState {
    pub fn new(estimated_item_height: f32, overscan: usize) -> Self {
        Self {
            keys: Vec::new(),
            measured: HashMap::new(),
            offsets: vec![0.0],
            estimated_item_height,
            scroll_position: 0.0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan,
            visible_range: 0..0,
        }
    }

    pub fn total_items(&self) -> usize {
        self.keys.len()
    }

    /// Replace the rows (new data or new sort order) and recompute.
    pub fn set_rows(&mut self, keys: Vec<RecordId>) {
        self.keys = keys;
        self.rebuild_offsets(0);
        self.clamp_scroll();
        self.calculate_visible_range();
    }

    /// Forget measurements for rows that are no longer loaded.
    pub fn prune_measurements(&mut self) {
        let live: std::collections::HashSet<_> = self.keys.iter().copied().collect();
        self.measured.retain(|key, _| live.contains(key));
    }

    pub fn item_size(&self, index: usize) -> f32 {
        self.keys
            .get(index)
            .and_then(|key| self.measured.get(key).copied())
            .unwrap_or(self.estimated_item_height)
    }

    pub fn item_start(&self, index: usize) -> f32 {
        self.offsets[index.min(self.keys.len())]
    }

    pub fn total_height(&self) -> f32 {
        self.offsets[self.keys.len()]
    }

    pub fn max_scroll(&self) -> f32 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    fn rebuild_offsets(&mut self, from: usize) {
        let from = from.min(self.keys.len());
        self.offsets.truncate(from + 1);
        let mut cursor = self.offsets[from];
        for index in from..self.keys.len() {
            cursor += self.item_size(index);
            self.offsets.push(cursor);
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_position = self.scroll_position.clamp(0.0, self.max_scroll());
    }

    /// Calculate which items should be visible based on scroll position
    pub fn calculate_visible_range(&mut self) -> Range<usize> {
        let total = self.keys.len();
        if total == 0 || self.viewport_height <= 0.0 {
            self.visible_range = 0..0;
            return self.visible_range.clone();
        }

        let top = self.scroll_position;
        let bottom = top + self.viewport_height;

        // Rows whose end is at or above the top edge are fully scrolled past
        let first_visible = self.offsets[1..].partition_point(|&end| end <= top);
        // Rows that start above the bottom edge intersect the viewport
        let mut last_visible = self.offsets[..total].partition_point(|&start| start < bottom);
        if last_visible <= first_visible {
            last_visible = (first_visible + 1).min(total);
        }

        // Add overscan
        let start = first_visible.min(total).saturating_sub(self.overscan);
        let end = (last_visible + self.overscan).min(total);

        self.visible_range = start..end;
        self.visible_range.clone()
    }

    /// Update scroll position and viewport, then recalculate
    pub fn update_scroll(&mut self, scroll_position: f32, viewport_height: f32) {
        self.viewport_height = viewport_height;
        self.scroll_position = scroll_position;
        self.clamp_scroll();
        self.calculate_visible_range();
    }

    /// Viewport was resized; scroll offset is kept
    pub fn resize(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height;
        self.clamp_scroll();
        self.calculate_visible_range();
    }

    /// Record the real height of a row.
    ///
    /// When the row starts above the current scroll offset the offset moves
    /// by the same delta, so whatever is on screen stays put. Returns the
    /// scroll adjustment that was applied.
    pub fn measure(&mut self, key: RecordId, size: f32) -> f32 {
        let Some(index) = self.keys.iter().position(|k| *k == key) else {
            self.measured.insert(key, size);
            return 0.0;
        };

        let delta = size - self.item_size(index);
        self.measured.insert(key, size);
        if delta == 0.0 {
            return 0.0;
        }

        let was_above = self.item_start(index) < self.scroll_position;
        self.rebuild_offsets(index);

        let adjustment = if was_above {
            let before = self.scroll_position;
            self.scroll_position += delta;
            self.clamp_scroll();
            self.scroll_position - before
        } else {
            0.0
        };

        self.calculate_visible_range();
        adjustment
    }

    /// Jump so that row `index` sits at the top of the viewport
    pub fn scroll_to_index(&mut self, index: usize) {
        self.scroll_position = self.item_start(index);
        self.clamp_scroll();
        self.calculate_visible_range();
    }

    /// Rows in the current window, in display order
    pub fn visible_rows(&self) -> Vec<VirtualRow> {
        self.visible_range
            .clone()
            .map(|index| VirtualRow {
                index,
                key: self.keys[index],
                start: self.offsets[index],
                size: self.offsets[index + 1] - self.offsets[index],
            })
            .collect()
    }

    /// Spacer above the first rendered row
    pub fn padding_before(&self) -> f32 {
        self.item_start(self.visible_range.start)
    }

    /// Spacer below the last rendered row
    pub fn padding_after(&self) -> f32 {
        self.total_height() - self.item_start(self.visible_range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: i64) -> Vec<RecordId> {
        (1..=n).map(RecordId).collect()
    }

    fn list(n: i64) -> VirtualListState {
        let mut state = VirtualListState::new(33.0, 5);
        state.viewport_height = 330.0;
        state.set_rows(keys(n));
        state
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut state = VirtualListState::default();
        assert_eq!(state.calculate_visible_range(), 0..0);
        assert!(state.visible_rows().is_empty());
    }

    #[test]
    fn top_of_list_window_includes_overscan_below() {
        let state = list(100);
        // 10 rows fit, plus 5 overscan
        assert_eq!(state.visible_range, 0..15);
    }

    #[test]
    fn window_covers_viewport_with_overscan_both_sides() {
        let mut state = list(100);
        state.update_scroll(33.0 * 40.0 + 10.0, 330.0);

        // rows 40..=50 intersect the viewport
        assert_eq!(state.visible_range, 35..56);
        for index in 40..=50 {
            assert!(state.visible_range.contains(&index));
        }
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut state = list(20);
        state.update_scroll(10_000.0, 330.0);
        assert_eq!(state.scroll_position, 20.0 * 33.0 - 330.0);
        assert_eq!(state.visible_range.end, 20);
    }

    #[test]
    fn resize_widens_window_and_keeps_offset() {
        let mut state = list(100);
        state.update_scroll(33.0 * 40.0, 330.0);

        state.resize(660.0);
        assert_eq!(state.scroll_position, 33.0 * 40.0);
        // rows 40..60 now fit, plus overscan
        assert_eq!(state.visible_range, 35..65);
    }

    #[test]
    fn resize_past_content_clamps_offset() {
        let mut state = list(20);
        state.update_scroll(330.0, 330.0);

        state.resize(500.0);
        assert_eq!(state.scroll_position, 160.0);
        assert_eq!(state.visible_range, 0..20);
    }

    #[test]
    fn measuring_a_row_above_the_viewport_keeps_content_anchored() {
        let mut state = list(100);
        state.update_scroll(33.0 * 50.0, 330.0);
        let anchor = RecordId(51); // index 50 sits at the top edge
        let visual_before = state.item_start(50) - state.scroll_position;

        let adjustment = state.measure(RecordId(3), 60.0);

        assert_eq!(adjustment, 27.0);
        let visual_after = state.item_start(50) - state.scroll_position;
        assert_eq!(visual_before, visual_after);
        assert_eq!(state.visible_rows().iter().find(|r| r.key == anchor).map(|r| r.index), Some(50));
    }

    #[test]
    fn measuring_a_visible_row_does_not_move_scroll() {
        let mut state = list(100);
        state.update_scroll(33.0 * 10.0, 330.0);
        let adjustment = state.measure(RecordId(15), 50.0);
        assert_eq!(adjustment, 0.0);
        assert_eq!(state.scroll_position, 330.0);
        assert_eq!(state.item_size(14), 50.0);
        assert_eq!(state.total_height(), 99.0 * 33.0 + 50.0);
    }

    #[test]
    fn measurements_follow_keys_across_reorder() {
        let mut state = list(3);
        state.measure(RecordId(1), 80.0);
        state.set_rows(vec![RecordId(3), RecordId(2), RecordId(1)]);
        assert_eq!(state.item_size(2), 80.0);
        assert_eq!(state.item_size(0), 33.0);
    }

    #[test]
    fn scroll_to_index_zero_resets_position() {
        let mut state = list(100);
        state.update_scroll(900.0, 330.0);
        state.scroll_to_index(0);
        assert_eq!(state.scroll_position, 0.0);
        assert_eq!(state.visible_range.start, 0);
    }

    #[test]
    fn spacers_account_for_unrendered_rows() {
        let mut state = list(100);
        state.update_scroll(33.0 * 40.0, 330.0);
        let rendered: f32 = state.visible_rows().iter().map(|r| r.size).sum();
        let sum = state.padding_before() + rendered + state.padding_after();
        assert!((sum - state.total_height()).abs() < 0.01);
    }
}
