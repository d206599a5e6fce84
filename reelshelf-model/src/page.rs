use crate::media::Record;

/// Fixed number of records the listing endpoint returns per page.
pub const PAGE_SIZE: u32 = 20;

/// One server-returned batch of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    #[cfg_attr(feature = "serde", serde(rename = "page"))]
    pub page_number: u32,
    #[cfg_attr(feature = "serde", serde(rename = "totalPages"))]
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(rename = "data", default))]
    pub records: Vec<Record>,
}

impl Page {
    pub fn new(page_number: u32, total_pages: u32, records: Vec<Record>) -> Self {
        Self {
            page_number,
            total_pages,
            records,
        }
    }

    /// True when this page is the final one of its result set.
    ///
    /// An empty result set is reported by the backend as `totalPages: 0`,
    /// which is treated the same as being on the last page.
    pub fn is_last(&self) -> bool {
        self.page_number >= self.total_pages
    }
}
