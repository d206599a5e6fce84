//! Common module containing types shared across domains

pub mod messages;

pub use messages::{CrossDomainEvent, EventBus, EventReceiver};
