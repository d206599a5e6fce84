pub mod cross_domain;

use reelshelf_model::RecordId;

use crate::domains::ui::feedback::Toast;

pub use self::cross_domain::{EventBus, EventReceiver};

/// Events that one domain raises for another to react to
#[derive(Debug, Clone, PartialEq)]
pub enum CrossDomainEvent {
    /// Server-side data changed; every cached page is stale
    CatalogInvalidated,
    /// Show a transient notification
    Notify(Toast),
    /// Open the detail view for a record
    NavigateToRecord(RecordId),
}

impl CrossDomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogInvalidated => "CrossDomain::CatalogInvalidated",
            Self::Notify(_) => "CrossDomain::Notify",
            Self::NavigateToRecord(_) => "CrossDomain::NavigateToRecord",
        }
    }
}
