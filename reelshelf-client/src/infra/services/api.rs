//! API service trait and the HTTP-backed implementation
//!
//! Domains talk to the backend through [`CatalogApi`] so tests can swap in
//! the in-memory stub from `infra::testing`.

use async_trait::async_trait;

use reelshelf_model::{PAGE_SIZE, Page, QuerySignature, Record, RecordId};

use crate::domains::catalog::fetcher::PageFetcher;
use crate::error::NetworkError;
use crate::infra::api_client::ApiClient;
use crate::infra::api_types::{CreateRecordBody, UpdateRecordBody};
use crate::infra::constants::routes::movies;

/// Record-level operations on top of paged listing
#[async_trait]
pub trait CatalogApi: PageFetcher {
    /// Fetch a single record for the detail view
    async fn get_record(&self, id: RecordId) -> Result<Record, NetworkError>;

    /// Create a record from an already encoded body
    async fn create_record(&self, body: &CreateRecordBody) -> Result<Record, NetworkError>;

    /// Apply a partial update
    async fn update_record(
        &self,
        id: RecordId,
        body: &UpdateRecordBody,
    ) -> Result<Record, NetworkError>;

    /// Remove a record
    async fn delete_record(&self, id: RecordId) -> Result<(), NetworkError>;
}

/// Listing query string: paging first, then only the active filters
pub fn listing_query(signature: &QuerySignature, page: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string()), ("limit", PAGE_SIZE.to_string())];
    query.extend(signature.query_pairs());
    query
}

#[async_trait]
impl PageFetcher for ApiClient {
    async fn fetch(&self, signature: &QuerySignature, page: u32) -> Result<Page, NetworkError> {
        let query = listing_query(signature, page);
        let page: Page = self.get_with_query(movies::COLLECTION, &query).await?;
        log::debug!(
            "[ApiClient] page {}/{} with {} records for {}",
            page.page_number,
            page.total_pages,
            page.records.len(),
            signature
        );
        Ok(page)
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn get_record(&self, id: RecordId) -> Result<Record, NetworkError> {
        self.get(&movies::item(id)).await
    }

    async fn create_record(&self, body: &CreateRecordBody) -> Result<Record, NetworkError> {
        self.post(movies::COLLECTION, body).await
    }

    async fn update_record(
        &self,
        id: RecordId,
        body: &UpdateRecordBody,
    ) -> Result<Record, NetworkError> {
        self.put(&movies::item(id), body).await
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), NetworkError> {
        self.delete(&movies::item(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelshelf_model::MediaKind;

    #[test]
    fn listing_query_always_pages_by_twenty() {
        let query = listing_query(&QuerySignature::new(), 3);
        assert_eq!(
            query,
            vec![("page", "3".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn listing_query_appends_active_filters() {
        let sig = QuerySignature::new()
            .with_search("matrix")
            .with_type(Some(MediaKind::Movie));
        let query = listing_query(&sig, 1);
        assert_eq!(query.len(), 4);
        assert_eq!(query[2], ("search", "matrix".to_string()));
        assert_eq!(query[3], ("type", "MOVIE".to_string()));
    }
}
