use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reelshelf_model::{ImageId, ImageRef, PAGE_SIZE, Page, QuerySignature, Record, RecordId};

use crate::domains::catalog::fetcher::PageFetcher;
use crate::error::NetworkError;
use crate::infra::api_types::{CreateRecordBody, UpdateRecordBody};
use crate::infra::services::CatalogApi;

/// One listing request the stub served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub signature: QuerySignature,
    pub page: u32,
}

/// In-memory catalog backend.
///
/// Filters and pages like the real server (20 per page, filters combined
/// with AND), records every listing call, and can be told to fail.
#[derive(Debug, Clone)]
pub struct TestCatalogApi {
    inner: Arc<RwLock<InnerCatalogState>>,
}

#[derive(Debug, Default)]
struct InnerCatalogState {
    records: Vec<Record>,
    next_id: i64,
    next_image_id: i64,
    fetches: Vec<FetchCall>,
    fetch_failures: VecDeque<NetworkError>,
    mutation_failures: VecDeque<NetworkError>,
    latency: Option<Duration>,
    created: Vec<CreateRecordBody>,
    updated: Vec<UpdateRecordBody>,
    deleted: Vec<RecordId>,
}

impl Default for TestCatalogApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCatalogApi {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(InnerCatalogState {
                records,
                next_id,
                next_image_id: 1,
                ..InnerCatalogState::default()
            })),
        }
    }

    /// `count` generated records with ids `1..=count`
    pub fn seeded(count: usize) -> Self {
        Self::with_records(crate::infra::testing::fixtures::records(count))
    }

    fn read<R>(&self, f: impl FnOnce(&InnerCatalogState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut InnerCatalogState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Delay every listing response by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.write(|s| s.latency = Some(latency));
    }

    pub fn fail_next_fetch(&self, err: NetworkError) {
        self.write(|s| s.fetch_failures.push_back(err));
    }

    pub fn fail_next_mutation(&self, err: NetworkError) {
        self.write(|s| s.mutation_failures.push_back(err));
    }

    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.read(|s| s.fetches.clone())
    }

    pub fn fetch_count(&self) -> usize {
        self.read(|s| s.fetches.len())
    }

    pub fn clear_calls(&self) {
        self.write(|s| s.fetches.clear());
    }

    pub fn records(&self) -> Vec<Record> {
        self.read(|s| s.records.clone())
    }

    pub fn created_bodies(&self) -> Vec<CreateRecordBody> {
        self.read(|s| s.created.clone())
    }

    pub fn updated_bodies(&self) -> Vec<UpdateRecordBody> {
        self.read(|s| s.updated.clone())
    }

    pub fn deleted_ids(&self) -> Vec<RecordId> {
        self.read(|s| s.deleted.clone())
    }

    /// Server-side listing: filter, then slice the requested page
    pub fn page_for(&self, signature: &QuerySignature, page: u32) -> Page {
        self.read(|s| {
            let matching: Vec<&Record> = s.records.iter().filter(|r| listing_matches(signature, r)).collect();
            let size = PAGE_SIZE as usize;
            let total_pages = matching.len().div_ceil(size) as u32;
            let start = (page.saturating_sub(1) as usize) * size;
            let records = matching
                .into_iter()
                .skip(start)
                .take(size)
                .cloned()
                .collect();
            Page::new(page, total_pages, records)
        })
    }

    fn take_mutation_failure(&self) -> Option<NetworkError> {
        self.write(|s| s.mutation_failures.pop_front())
    }

    fn not_found(id: RecordId) -> NetworkError {
        NetworkError::Status {
            status: 404,
            url: format!("/movies/{id}"),
            message: "Movie not found".to_string(),
        }
    }
}

fn listing_matches(signature: &QuerySignature, record: &Record) -> bool {
    let search = signature.search_text.trim().to_lowercase();
    if !search.is_empty() && !record.title.to_lowercase().contains(&search) {
        return false;
    }
    if let Some(kind) = signature.type_filter
        && record.media_type != kind
    {
        return false;
    }
    if let Some(year) = signature.year_filter
        && record.release_year != year
    {
        return false;
    }
    if let Some(director) = &signature.director_filter
        && !record.director.trim().eq_ignore_ascii_case(director.trim())
    {
        return false;
    }
    true
}

#[async_trait]
impl PageFetcher for TestCatalogApi {
    async fn fetch(&self, signature: &QuerySignature, page: u32) -> Result<Page, NetworkError> {
        let (latency, failure) = self.write(|s| {
            s.fetches.push(FetchCall {
                signature: signature.clone(),
                page,
            });
            (s.latency, s.fetch_failures.pop_front())
        });

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(self.page_for(signature, page)),
        }
    }
}

#[async_trait]
impl CatalogApi for TestCatalogApi {
    async fn get_record(&self, id: RecordId) -> Result<Record, NetworkError> {
        self.read(|s| s.records.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_record(&self, body: &CreateRecordBody) -> Result<Record, NetworkError> {
        if let Some(err) = self.take_mutation_failure() {
            return Err(err);
        }
        Ok(self.write(|s| {
            let id = RecordId(s.next_id);
            s.next_id += 1;

            let mut record = Record::new(
                id,
                body.title.clone(),
                body.director.clone(),
                body.release_year,
                body.media_type,
            );
            record.description = Some(body.description.clone()).filter(|d| !d.is_empty());
            record.location = Some(body.location.clone()).filter(|l| !l.is_empty());
            record.budget = body.budget;
            record.duration_minutes = body.duration_minutes;

            let poster = ImageRef::new(ImageId(s.next_image_id), body.poster.clone());
            s.next_image_id += 1;
            record = record.with_poster(poster);
            for url in &body.images {
                record.gallery.push(ImageRef::new(ImageId(s.next_image_id), url.clone()));
                s.next_image_id += 1;
            }

            s.created.push(body.clone());
            s.records.push(record.clone());
            record
        }))
    }

    async fn update_record(
        &self,
        id: RecordId,
        body: &UpdateRecordBody,
    ) -> Result<Record, NetworkError> {
        if let Some(err) = self.take_mutation_failure() {
            return Err(err);
        }
        self.write(|s| {
            s.updated.push(body.clone());
            let record = s
                .records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Self::not_found(id))?;

            if let Some(title) = &body.title {
                record.title = title.clone();
            }
            if let Some(director) = &body.director {
                record.director = director.clone();
            }
            if let Some(year) = body.release_year {
                record.release_year = year;
            }
            if let Some(kind) = body.media_type {
                record.media_type = kind;
            }
            if body.description.is_some() {
                record.description = body.description.clone();
            }
            if body.location.is_some() {
                record.location = body.location.clone();
            }
            if body.budget.is_some() {
                record.budget = body.budget;
            }
            if body.duration_minutes.is_some() {
                record.duration_minutes = body.duration_minutes;
            }
            Ok(record.clone())
        })
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), NetworkError> {
        if let Some(err) = self.take_mutation_failure() {
            return Err(err);
        }
        self.write(|s| {
            let before = s.records.len();
            s.records.retain(|r| r.id != id);
            if s.records.len() == before {
                return Err(Self::not_found(id));
            }
            s.deleted.push(id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelshelf_model::MediaKind;

    #[test]
    fn pages_by_twenty() {
        let api = TestCatalogApi::seeded(45);
        let sig = QuerySignature::new();

        let first = api.page_for(&sig, 1);
        assert_eq!(first.records.len(), 20);
        assert_eq!(first.total_pages, 3);

        let last = api.page_for(&sig, 3);
        assert_eq!(last.records.len(), 5);
        assert!(last.is_last());
    }

    #[test]
    fn filters_combine() {
        let api = TestCatalogApi::with_records(vec![
            Record::new(1, "The Matrix", "Wachowski", 1999, MediaKind::Movie),
            Record::new(2, "The Matrix Reloaded", "Wachowski", 2003, MediaKind::Movie),
            Record::new(3, "Matrix Show", "Someone", 2003, MediaKind::TvShow),
        ]);
        let sig = QuerySignature::new()
            .with_search("matrix")
            .with_year(Some(2003));
        let ids: Vec<i64> = api.page_for(&sig, 1).records.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);

        let sig = sig.with_type(Some(MediaKind::Movie));
        assert_eq!(api.page_for(&sig, 1).records.len(), 1);
    }
}
