//! Cross-domain event delivery
//!
//! Producers hold a cheap [`EventBus`] clone; a single consumer drains the
//! matching [`EventReceiver`] and routes each event to the domain that owns
//! the affected state.

use tokio::sync::mpsc;

use crate::common::messages::CrossDomainEvent;

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<CrossDomainEvent>,
}

#[derive(Debug)]
pub struct EventReceiver {
    receiver: mpsc::UnboundedReceiver<CrossDomainEvent>,
}

impl EventBus {
    pub fn channel() -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, EventReceiver { receiver })
    }

    pub fn emit(&self, event: CrossDomainEvent) {
        log::debug!("[CrossDomain] {}", event.name());
        // No consumer left means nobody is interested any more
        let _ = self.sender.send(event);
    }
}

impl EventReceiver {
    pub async fn recv(&mut self) -> Option<CrossDomainEvent> {
        self.receiver.recv().await
    }

    /// Everything already queued, without waiting
    pub fn drain(&mut self) -> Vec<CrossDomainEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}
