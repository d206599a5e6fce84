//! Transient user notifications.
//!
//! Toasts are pushed by the mutation flows and expire on their own after
//! [`TOAST_TTL`]. Clocks are `tokio::time::Instant` so paused-time tests can
//! advance them.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::infra::config::ClientConfig;
use crate::infra::constants::feedback::TOAST_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ToastLevel::Success => "ok",
            ToastLevel::Error => "error",
            ToastLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

#[derive(Debug, Clone)]
struct ActiveToast {
    id: u64,
    toast: Toast,
    expires_at: Instant,
}

/// Queue of visible toasts, oldest first
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    next_id: u64,
    active: VecDeque<ActiveToast>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(TOAST_TTL)
    }
}

impl From<&ClientConfig> for NotificationCenter {
    fn from(config: &ClientConfig) -> Self {
        Self::new(config.toast_ttl())
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 0,
            active: VecDeque::new(),
        }
    }

    /// Show a toast; returns its id for manual dismissal.
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.push_at(toast, Instant::now())
    }

    pub fn push_at(&mut self, toast: Toast, now: Instant) -> u64 {
        self.next_id += 1;
        log::debug!("[Feedback] {}", toast);
        self.active.push_back(ActiveToast {
            id: self.next_id,
            toast,
            expires_at: now + self.ttl,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        before != self.active.len()
    }

    /// Drop every toast whose lifetime ended at or before `now`.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|t| t.expires_at > now);
        before - self.active.len()
    }

    /// Earliest pending expiry, for scheduling the next prune
    pub fn next_expiry(&self) -> Option<Instant> {
        self.active.iter().map(|t| t.expires_at).min()
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.active.iter().map(|t| t.toast.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
