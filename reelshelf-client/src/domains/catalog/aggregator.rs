//! Page cache and aggregator
//!
//! Owns the flattened record list for the active query signature. Nothing
//! else mutates it; readers borrow [`PageCache::records`] or take a snapshot.

use std::collections::HashSet;

use log::{debug, warn};
use reelshelf_model::{Page, QuerySignature, Record, RecordId};

/// Result of offering a page to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Records were appended; `skipped` counts ids that were already present
    Appended { added: usize, skipped: usize },
    /// The page belongs to a signature that is no longer active
    StaleSignature,
    /// A page with this number (or a later one) was already appended
    AlreadyApplied,
    /// The page does not directly follow the last appended page
    OutOfOrder { expected: u32, got: u32 },
}

#[derive(Debug, Clone)]
pub struct PageCache {
    signature: QuerySignature,
    records: Vec<Record>,
    seen: HashSet<RecordId>,
    /// `(page_number, total_pages)` of the most recently appended page
    last_page: Option<(u32, u32)>,
}

impl PageCache {
    pub fn new(signature: QuerySignature) -> Self {
        Self {
            signature,
            records: Vec::new(),
            seen: HashSet::new(),
            last_page: None,
        }
    }

    pub fn signature(&self) -> &QuerySignature {
        &self.signature
    }

    /// Append a page fetched for `signature`.
    ///
    /// Records whose id is already present are skipped so the list never
    /// holds duplicates, and insertion order is fetch order.
    pub fn append(&mut self, signature: &QuerySignature, page: Page) -> AppendOutcome {
        if *signature != self.signature {
            debug!(
                "[Catalog] dropping page {} for stale signature ({})",
                page.page_number, signature
            );
            return AppendOutcome::StaleSignature;
        }

        let expected = self.next_page();
        if page.page_number < expected {
            return AppendOutcome::AlreadyApplied;
        }
        if page.page_number > expected {
            warn!(
                "[Catalog] refusing page {} while waiting for page {}",
                page.page_number, expected
            );
            return AppendOutcome::OutOfOrder {
                expected,
                got: page.page_number,
            };
        }

        let mut added = 0;
        let mut skipped = 0;
        for record in page.records {
            if self.seen.insert(record.id) {
                self.records.push(record);
                added += 1;
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(
                "[Catalog] page {} repeated {} already loaded record(s)",
                page.page_number, skipped
            );
        }

        self.last_page = Some((page.page_number, page.total_pages));
        AppendOutcome::Appended { added, skipped }
    }

    /// Clear the list and pagination cursor, keeping the signature.
    pub fn reset(&mut self) {
        self.records.clear();
        self.seen.clear();
        self.last_page = None;
    }

    /// Switch to a new signature with an empty list.
    pub fn reset_to(&mut self, signature: QuerySignature) {
        self.reset();
        self.signature = signature;
    }

    /// True until the last appended page reports it was the final one.
    pub fn has_next_page(&self) -> bool {
        match self.last_page {
            None => true,
            Some((page, total)) => page < total,
        }
    }

    /// Number of the page that should be fetched next.
    pub fn next_page(&self) -> u32 {
        self.last_page.map(|(page, _)| page + 1).unwrap_or(1)
    }

    /// Last appended page number, 0 before the first append.
    pub fn current_page(&self) -> u32 {
        self.last_page.map(|(page, _)| page).unwrap_or(0)
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.last_page.map(|(_, total)| total)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.seen.contains(&id)
    }
}
