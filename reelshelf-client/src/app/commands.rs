//! Command handlers behind the `reelshelf` binary

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::debug;
use reelshelf_model::{QuerySignature, RecordId, SortSpec};

use crate::app::bootstrap::AppContext;
use crate::app::cli::{AddArgs, EditArgs};
use crate::common::messages::{CrossDomainEvent, EventBus, EventReceiver};
use crate::domains::auth::{AuthService, Session};
use crate::domains::catalog::{
    CatalogEvent, CatalogRuntime, CatalogSnapshot, CatalogView, PageFetcher, ScrollMetrics,
    ViewSettings,
};
use crate::domains::media::{ImageSlot, ImageSource, MutationCoordinator, RecordDraft, RecordPatch};
use crate::domains::ui::{NotificationCenter, table};
use crate::error::CatalogError;
use crate::infra::services::CatalogApi;

/// Terminal "viewport": ten rows, so one page more than fills it
const VIEWPORT_ROWS: f32 = 10.0;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let auth = AuthService::new(ctx.api.clone());
    let session = auth.login(email, password).await.map_err(user_error)?;
    if let Some(dir) = &ctx.config_dir {
        let path = session.save_to_dir(dir).context("saving session")?;
        debug!("[App] session saved to {}", path.display());
    }
    let name = session
        .user
        .as_ref()
        .map(|u| u.name.as_str())
        .unwrap_or(email);
    println!("Logged in successfully as {name}");
    Ok(())
}

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let auth = AuthService::new(ctx.api.clone());
    let message = auth.register(name, email, password).await.map_err(user_error)?;
    if message.is_empty() {
        println!("Registered successfully");
    } else {
        println!("{message}");
    }
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.api.set_session(Session::anonymous()).await;
    if let Some(dir) = &ctx.config_dir {
        Session::clear_in_dir(dir).context("removing saved session")?;
    }
    println!("Logged out");
    Ok(())
}

/// Outcome of driving the catalog view headlessly
#[derive(Debug)]
pub struct LoadedCatalog {
    pub snapshot: CatalogSnapshot,
}

/// Drive a [`CatalogView`] the way a scrolling user would: attach, then
/// scroll to the bottom until `pages` pages are loaded or the server runs
/// out. `pages == None` loads everything.
pub async fn load_catalog(
    fetcher: Arc<dyn PageFetcher>,
    settings: ViewSettings,
    signature: QuerySignature,
    pages: Option<u32>,
    sort: Option<SortSpec>,
) -> Result<LoadedCatalog> {
    let settings = ViewSettings {
        viewport_height: settings.estimated_row_height * VIEWPORT_ROWS,
        ..settings
    };
    let view = CatalogView::with_signature(settings, signature);
    let handle = CatalogRuntime::spawn(fetcher, view);

    handle.send(CatalogEvent::Attached(ScrollMetrics::new(
        0.0,
        0.0,
        settings.viewport_height,
    )));

    let mut target = 1;
    loop {
        let snapshot = handle
            .wait_until(|s| {
                !s.loading && (s.current_page >= target || !s.has_next_page || s.error.is_some())
            })
            .await
            .context("catalog runtime stopped unexpectedly")?;

        if let Some(err) = snapshot.error {
            handle.shutdown().await;
            return Err(CatalogError::from(err)).context("loading catalog");
        }
        let done = pages.is_some_and(|p| snapshot.current_page >= p);
        if done || !snapshot.has_next_page {
            break;
        }
        target = snapshot.current_page + 1;
        handle.scroll_to_bottom();
    }

    if sort.is_some() {
        handle.send(CatalogEvent::SortChanged(sort));
    }
    let snapshot = handle
        .wait_until(|s| s.sort == sort)
        .await
        .context("catalog runtime stopped unexpectedly")?;
    handle.shutdown().await;

    Ok(LoadedCatalog { snapshot })
}

pub async fn list(
    ctx: &AppContext,
    signature: QuerySignature,
    pages: Option<u32>,
    sort: Option<SortSpec>,
) -> Result<()> {
    let settings = ViewSettings::from(&ctx.config);
    let loaded = load_catalog(Arc::new(ctx.api.clone()), settings, signature, pages, sort).await?;
    let snapshot = loaded.snapshot;

    if snapshot.is_empty() {
        println!("No records match {}", snapshot.signature);
        return Ok(());
    }
    print!("{}", table::render(&snapshot.rows));
    println!(
        "\n{} records, page {} of {}{}",
        snapshot.len(),
        snapshot.current_page,
        snapshot.total_pages.unwrap_or(0),
        if snapshot.has_next_page {
            " (more available)"
        } else {
            ""
        }
    );
    Ok(())
}

pub async fn facets(ctx: &AppContext, signature: QuerySignature, pages: u32) -> Result<()> {
    let settings = ViewSettings::from(&ctx.config);
    let loaded =
        load_catalog(Arc::new(ctx.api.clone()), settings, signature, Some(pages), None).await?;
    let facets = loaded.snapshot.facets;

    let years: Vec<String> = facets.years.iter().map(|y| y.to_string()).collect();
    println!("Years:     {}", years.join(", "));
    println!("Directors: {}", facets.directors.join(", "));
    Ok(())
}

pub async fn show(ctx: &AppContext, id: i64) -> Result<()> {
    let record = ctx
        .api
        .get_record(RecordId(id))
        .await
        .map_err(CatalogError::from)
        .with_context(|| format!("Failed to load movie details for #{id}"))?;
    print!("{}", table::render_detail(&record));
    Ok(())
}

fn coordinator(ctx: &AppContext) -> (MutationCoordinator, EventReceiver) {
    let (bus, events) = EventBus::channel();
    let api: Arc<dyn CatalogApi> = Arc::new(ctx.api.clone());
    (MutationCoordinator::new(api, bus), events)
}

/// Print the toasts a mutation raised that are still live
fn report(ctx: &AppContext, events: &mut EventReceiver) {
    let mut center = NotificationCenter::from(&ctx.config);
    for event in events.drain() {
        if let CrossDomainEvent::Notify(toast) = event {
            center.push(toast);
        }
    }
    center.prune(tokio::time::Instant::now());
    for toast in center.visible() {
        println!("{toast}");
    }
}

pub async fn add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let draft = RecordDraft {
        title: args.title,
        director: args.director,
        release_year: args.year,
        media_type: args.media_type,
        description: args.description,
        budget: args.budget,
        location: args.location,
        duration_minutes: args.duration,
        poster: Some(ImageSource::path(args.poster)),
        gallery: args.images.into_iter().map(ImageSource::path).collect(),
    };

    let (coordinator, mut events) = coordinator(ctx);
    let result = coordinator.create(draft).await;
    report(ctx, &mut events);
    let record = result.map_err(user_error)?;
    println!("Created #{} {}", record.id, record.title);
    Ok(())
}

pub async fn edit(ctx: &AppContext, args: EditArgs) -> Result<()> {
    let id = RecordId(args.id);
    let (coordinator, mut events) = coordinator(ctx);

    let gallery = if args.images.is_empty() {
        None
    } else {
        let current = coordinator.load(id).await.map_err(user_error)?;
        let mut slots: Vec<ImageSlot> = current.gallery.into_iter().map(ImageSlot::Keep).collect();
        slots.extend(
            args.images
                .into_iter()
                .map(|p| ImageSlot::Upload(ImageSource::path(p))),
        );
        Some(slots)
    };

    let patch = RecordPatch {
        title: args.title,
        director: args.director,
        release_year: args.year,
        media_type: args.media_type,
        description: args.description,
        budget: args.budget,
        location: args.location,
        duration_minutes: args.duration,
        poster: args.poster.map(|p| ImageSlot::Upload(ImageSource::path(p))),
        gallery,
    };
    if patch.is_empty() {
        bail!("nothing to change; pass at least one field to edit");
    }

    let result = coordinator.update(id, patch).await;
    report(ctx, &mut events);
    let record = result.map_err(user_error)?;
    println!("Updated #{} {}", record.id, record.title);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<()> {
    let (coordinator, mut events) = coordinator(ctx);
    let result = coordinator.delete(RecordId(id)).await;
    report(ctx, &mut events);
    result.map_err(user_error)?;
    Ok(())
}

pub fn config(ctx: &AppContext, save: bool) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&ctx.config).context("rendering config")?;
    println!("{rendered}");
    if save {
        let path = ctx.config.save().context("saving config")?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Validation errors are user mistakes; they read better without a chain.
fn user_error(err: CatalogError) -> anyhow::Error {
    match err {
        CatalogError::Validation(v) => anyhow::anyhow!("invalid input: {v}"),
        CatalogError::Network(n) => anyhow::Error::new(n),
    }
}
