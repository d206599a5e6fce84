//! Create, edit and delete through the coordinator, checking the bodies the
//! backend receives and the events raised for the rest of the client.

use std::sync::Arc;
use std::time::Duration;

use reelshelf_client::common::messages::{CrossDomainEvent, EventBus, EventReceiver};
use reelshelf_client::domains::media::{
    ImageSlot, ImageSource, MutationCoordinator, RecordDraft, RecordPatch,
};
use reelshelf_client::domains::ui::{NotificationCenter, Toast};
use reelshelf_client::error::{CatalogError, NetworkError, ValidationError};
use reelshelf_client::infra::testing::TestCatalogApi;
use reelshelf_model::{ImageId, ImageRef, MediaKind, RecordId};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn coordinator(api: &Arc<TestCatalogApi>) -> (MutationCoordinator, EventReceiver) {
    let (bus, events) = EventBus::channel();
    (MutationCoordinator::new(api.clone(), bus), events)
}

fn toasts(events: Vec<CrossDomainEvent>) -> Vec<Toast> {
    events
        .into_iter()
        .filter_map(|e| match e {
            CrossDomainEvent::Notify(toast) => Some(toast),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn create_encodes_poster_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let poster_path = dir.path().join("poster.png");
    tokio::fs::write(&poster_path, PNG_MAGIC).await.unwrap();

    let api = Arc::new(TestCatalogApi::new());
    let (coordinator, mut events) = coordinator(&api);

    let mut draft = RecordDraft::new("  Arrival ", "Denis Villeneuve", 2016, MediaKind::Movie)
        .with_poster(ImageSource::path(&poster_path));
    draft.gallery.push(ImageSource::bytes("still.png", PNG_MAGIC.to_vec()));

    let created = coordinator.create(draft).await.unwrap();
    assert_eq!(created.title, "Arrival");
    assert!(created.poster.is_some());
    assert_eq!(created.gallery.len(), 1);

    let bodies = api.created_bodies();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].poster.starts_with("data:image/png;base64,"));
    assert!(bodies[0].images[0].starts_with("data:image/png;base64,"));

    assert_eq!(
        events.drain(),
        vec![
            CrossDomainEvent::CatalogInvalidated,
            CrossDomainEvent::Notify(Toast::success("Movie added successfully")),
        ]
    );
}

#[tokio::test]
async fn invalid_draft_sends_nothing_and_stays_quiet() {
    let api = Arc::new(TestCatalogApi::new());
    let (coordinator, mut events) = coordinator(&api);

    let draft = RecordDraft::new("Arrival", "Denis Villeneuve", 2016, MediaKind::Movie);
    let err = coordinator.create(draft).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::Validation(ValidationError::MissingField { field: "poster" })
    );
    assert!(api.created_bodies().is_empty());
    assert!(events.drain().is_empty());
}

#[tokio::test]
async fn unreadable_image_fails_the_whole_payload() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(TestCatalogApi::new());
    let (coordinator, mut events) = coordinator(&api);

    let mut draft = RecordDraft::new("Arrival", "Denis Villeneuve", 2016, MediaKind::Movie)
        .with_poster(ImageSource::bytes("poster.png", PNG_MAGIC.to_vec()));
    draft.gallery.push(ImageSource::path(dir.path().join("missing.png")));

    let err = coordinator.create(draft).await.unwrap_err();
    assert!(err.is_validation());
    assert!(api.created_bodies().is_empty());
    assert!(events.drain().is_empty());
}

#[tokio::test]
async fn server_rejection_raises_error_toast_only() {
    let api = Arc::new(TestCatalogApi::seeded(3));
    api.fail_next_mutation(NetworkError::Status {
        status: 500,
        url: "/movies/2".into(),
        message: "database unavailable".into(),
    });
    let (coordinator, mut events) = coordinator(&api);

    let err = coordinator.delete(RecordId(2)).await.unwrap_err();
    assert!(err.is_network());

    assert_eq!(
        events.drain(),
        vec![CrossDomainEvent::Notify(Toast::error(
            "Failed to delete movie: database unavailable"
        ))]
    );
    assert_eq!(api.records().len(), 3);
}

#[tokio::test]
async fn edit_keeps_existing_images_by_url() {
    let api = Arc::new(TestCatalogApi::seeded(3));
    let (coordinator, mut events) = coordinator(&api);

    let kept = ImageRef::new(ImageId(9), "https://cdn.example/kept.jpg");
    let patch = RecordPatch {
        title: Some("Renamed".into()),
        poster: Some(ImageSlot::Keep(kept.clone())),
        gallery: Some(vec![
            ImageSlot::Keep(kept),
            ImageSlot::Upload(ImageSource::bytes("new.png", PNG_MAGIC.to_vec())),
        ]),
        ..RecordPatch::default()
    };

    let updated = coordinator.update(RecordId(2), patch).await.unwrap();
    assert_eq!(updated.title, "Renamed");

    let body = &api.updated_bodies()[0];
    assert_eq!(body.id, RecordId(2));
    assert_eq!(body.poster.as_deref(), Some("https://cdn.example/kept.jpg"));
    let images = body.images.as_ref().unwrap();
    assert_eq!(images[0], "https://cdn.example/kept.jpg");
    assert!(images[1].starts_with("data:image/png;base64,"));
    assert!(body.director.is_none());

    assert_eq!(
        toasts(events.drain()),
        vec![Toast::success("Movie updated successfully")]
    );
}

#[tokio::test(start_paused = true)]
async fn toasts_expire_after_their_lifetime() {
    let api = Arc::new(TestCatalogApi::seeded(3));
    let (coordinator, mut events) = coordinator(&api);
    let mut center = NotificationCenter::new(Duration::from_secs(3));

    coordinator.delete(RecordId(1)).await.unwrap();
    for toast in toasts(events.drain()) {
        center.push(toast);
    }
    assert_eq!(center.visible(), vec![Toast::success("Movie deleted successfully")]);

    tokio::time::advance(Duration::from_millis(2_999)).await;
    assert_eq!(center.prune(tokio::time::Instant::now()), 0);

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(center.prune(tokio::time::Instant::now()), 1);
    assert!(center.is_empty());
}
