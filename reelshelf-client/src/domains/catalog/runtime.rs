//! Async driver for [`CatalogView`].
//!
//! The view itself is a pure reducer. The runtime owns it on a tokio task,
//! feeds it events from an unbounded channel, executes the effects it
//! returns and publishes a fresh [`CatalogSnapshot`] after every event.

use std::sync::Arc;

use log::{debug, trace};
use reelshelf_model::RecordId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::common::messages::CrossDomainEvent;
use crate::domains::catalog::fetcher::PageFetcher;
use crate::domains::catalog::messages::{CatalogEvent, Effect};
use crate::domains::catalog::state::{CatalogSnapshot, CatalogView};

#[derive(Debug)]
pub struct CatalogRuntime;

impl CatalogRuntime {
    /// Start driving `view` on the current tokio runtime.
    pub fn spawn(fetcher: Arc<dyn PageFetcher>, view: CatalogView) -> CatalogHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(view.snapshot());
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();

        let driver = Driver {
            view,
            fetcher,
            loopback: events_tx.downgrade(),
            snapshots: snapshots_tx,
            navigation: nav_tx,
        };
        let task = tokio::spawn(driver.run(events_rx));

        CatalogHandle {
            events: events_tx,
            snapshots: snapshots_rx,
            navigation: nav_rx,
            task,
        }
    }
}

/// Frontend side of a running catalog view
#[derive(Debug)]
pub struct CatalogHandle {
    events: mpsc::UnboundedSender<CatalogEvent>,
    snapshots: watch::Receiver<CatalogSnapshot>,
    navigation: mpsc::UnboundedReceiver<RecordId>,
    task: JoinHandle<()>,
}

impl CatalogHandle {
    /// Queue an event; returns false once the runtime has stopped.
    pub fn send(&self, event: CatalogEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until a published snapshot satisfies `condition`.
    pub async fn wait_until(
        &self,
        condition: impl FnMut(&CatalogSnapshot) -> bool,
    ) -> Option<CatalogSnapshot> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(condition).await.ok()?.clone();
        Some(snapshot)
    }

    /// Next record the view asked to navigate to
    pub async fn next_navigation(&mut self) -> Option<RecordId> {
        self.navigation.recv().await
    }

    /// Ask for the next page as if the user scrolled to the bottom.
    pub fn scroll_to_bottom(&self) -> bool {
        let metrics = self.snapshot().bottom_metrics();
        self.send(CatalogEvent::Scrolled(metrics))
    }

    /// Route an event raised elsewhere to the view.
    pub fn apply(&self, event: &CrossDomainEvent) {
        match event {
            CrossDomainEvent::CatalogInvalidated => {
                self.send(CatalogEvent::Invalidate);
            }
            CrossDomainEvent::NavigateToRecord(id) => {
                self.send(CatalogEvent::SelectRecord(*id));
            }
            CrossDomainEvent::Notify(_) => {}
        }
    }

    /// Stop the driver and wait for it to exit.
    pub async fn shutdown(self) {
        let CatalogHandle { events, task, .. } = self;
        drop(events);
        if let Err(err) = task.await {
            log::warn!("[Catalog] runtime task ended abnormally: {}", err);
        }
    }
}

struct Driver {
    view: CatalogView,
    fetcher: Arc<dyn PageFetcher>,
    /// Weak so that spawned effects do not keep the loop alive
    loopback: mpsc::WeakUnboundedSender<CatalogEvent>,
    snapshots: watch::Sender<CatalogSnapshot>,
    navigation: mpsc::UnboundedSender<RecordId>,
}

impl Driver {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<CatalogEvent>) {
        while let Some(event) = events.recv().await {
            let effects = self.view.update(event);
            for effect in effects {
                self.execute(effect);
            }
            self.snapshots.send_replace(self.view.snapshot());
        }
        debug!("[Catalog] runtime stopped");
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::FetchPage {
                token,
                signature,
                page,
            } => {
                let fetcher = Arc::clone(&self.fetcher);
                let loopback = self.loopback.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch(&signature, page).await;
                    if let Some(tx) = loopback.upgrade() {
                        let _ = tx.send(CatalogEvent::PageLoaded {
                            token,
                            signature,
                            page,
                            result,
                        });
                    }
                });
            }
            Effect::StartDebounce { generation, delay } => {
                let loopback = self.loopback.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(tx) = loopback.upgrade() {
                        let _ = tx.send(CatalogEvent::DebounceElapsed { generation });
                    }
                });
            }
            Effect::Navigate(id) => {
                let _ = self.navigation.send(id);
            }
            Effect::ScrollTo(offset) => {
                trace!("[Catalog] scroll to {}", offset);
            }
        }
    }
}
