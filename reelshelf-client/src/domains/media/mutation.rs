//! Create, edit and delete flows.
//!
//! Payloads are built (and images encoded) before anything is sent. A
//! successful mutation invalidates the catalog for every signature and raises
//! a success toast; a server or transport failure raises an error toast.
//! Validation failures are returned to the caller for inline display only.

use std::sync::Arc;

use log::{info, warn};
use reelshelf_model::{Record, RecordId};

use crate::common::messages::{CrossDomainEvent, EventBus};
use crate::domains::media::payload::{RecordDraft, RecordPatch};
use crate::domains::ui::feedback::Toast;
use crate::error::{CatalogError, CatalogResult, NetworkError};
use crate::infra::services::CatalogApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn success_message(self) -> &'static str {
        match self {
            Mutation::Create => "Movie added successfully",
            Mutation::Update => "Movie updated successfully",
            Mutation::Delete => "Movie deleted successfully",
        }
    }

    fn failure_message(self, err: &NetworkError) -> String {
        let fallback = match self {
            Mutation::Create => "Failed to add movie",
            Mutation::Update => "Failed to update movie",
            Mutation::Delete => "Failed to delete movie",
        };
        match err {
            NetworkError::Status { message, .. } if !message.is_empty() => {
                format!("{fallback}: {message}")
            }
            _ => fallback.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct MutationCoordinator {
    api: Arc<dyn CatalogApi>,
    events: EventBus,
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator").finish_non_exhaustive()
    }
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn CatalogApi>, events: EventBus) -> Self {
        Self { api, events }
    }

    pub async fn create(&self, draft: RecordDraft) -> CatalogResult<Record> {
        let body = draft.into_body().await?;
        let result = self.api.create_record(&body).await;
        self.finish(Mutation::Create, result)
    }

    pub async fn update(&self, id: RecordId, patch: RecordPatch) -> CatalogResult<Record> {
        let body = patch.into_body(id).await?;
        let result = self.api.update_record(id, &body).await;
        self.finish(Mutation::Update, result)
    }

    pub async fn delete(&self, id: RecordId) -> CatalogResult<()> {
        if !id.is_valid() {
            return Err(crate::error::ValidationError::InvalidField {
                field: "id",
                reason: format!("{id} is not a record id"),
            }
            .into());
        }
        let result = self.api.delete_record(id).await;
        self.finish(Mutation::Delete, result)
    }

    /// Detail lookup; no notifications, failures go to the caller.
    pub async fn load(&self, id: RecordId) -> CatalogResult<Record> {
        Ok(self.api.get_record(id).await?)
    }

    fn finish<T>(&self, kind: Mutation, result: Result<T, NetworkError>) -> CatalogResult<T> {
        match result {
            Ok(value) => {
                info!("[Mutation] {:?} succeeded", kind);
                self.events.emit(CrossDomainEvent::CatalogInvalidated);
                self.events
                    .emit(CrossDomainEvent::Notify(Toast::success(kind.success_message())));
                Ok(value)
            }
            Err(err) => {
                warn!("[Mutation] {:?} failed: {}", kind, err);
                self.events
                    .emit(CrossDomainEvent::Notify(Toast::error(kind.failure_message(&err))));
                Err(CatalogError::Network(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_includes_server_reason() {
        let err = NetworkError::Status {
            status: 400,
            url: "/movies".into(),
            message: "Title already exists".into(),
        };
        assert_eq!(
            Mutation::Create.failure_message(&err),
            "Failed to add movie: Title already exists"
        );

        let err = NetworkError::Transport {
            url: "/movies/1".into(),
            message: "connection refused".into(),
        };
        assert_eq!(Mutation::Delete.failure_message(&err), "Failed to delete movie");
    }
}
