use std::time::Duration;

use crate::infra::constants::search::DEBOUNCE;

/// Holds back keystrokes until the input has been quiet for `delay`.
///
/// Each keystroke bumps a generation counter and schedules a timer tagged
/// with it. Only the timer carrying the newest generation commits the text.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: u64,
    pending: Option<String>,
    committed: String,
}

/// A timer the caller should start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub generation: u64,
    pub delay: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            committed: String::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Text currently applied to the query
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Text typed but not yet applied
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Register a keystroke; the returned ticket supersedes earlier ones.
    pub fn input(&mut self, text: impl Into<String>) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(text.into());
        DebounceTicket {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// A timer fired. Returns the text to apply when the timer is current
    /// and the text differs from what is already applied.
    pub fn elapsed(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            log::trace!(
                "[Search] ignoring debounce tick {} (current {})",
                generation,
                self.generation
            );
            return None;
        }
        let text = self.pending.take()?;
        if text == self.committed {
            return None;
        }
        self.committed = text.clone();
        Some(text)
    }

    /// Apply `text` immediately, cancelling any pending timer.
    pub fn commit_now(&mut self, text: impl Into<String>) {
        self.generation += 1;
        self.pending = None;
        self.committed = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_keystroke_commits() {
        let mut debouncer = SearchDebouncer::default();
        let first = debouncer.input("matrix");
        let second = debouncer.input("matrix reloaded");

        assert_eq!(second.delay, Duration::from_millis(300));
        assert_eq!(debouncer.elapsed(first.generation), None);
        assert_eq!(
            debouncer.elapsed(second.generation).as_deref(),
            Some("matrix reloaded")
        );
        assert_eq!(debouncer.committed(), "matrix reloaded");
        assert_eq!(debouncer.pending(), None);
    }

    #[test]
    fn retyping_the_same_text_is_not_a_change() {
        let mut debouncer = SearchDebouncer::default();
        let t = debouncer.input("dune");
        debouncer.elapsed(t.generation);

        let t = debouncer.input("dune");
        assert_eq!(debouncer.elapsed(t.generation), None);
    }

    #[test]
    fn commit_now_cancels_pending_timer() {
        let mut debouncer = SearchDebouncer::default();
        let t = debouncer.input("alien");
        debouncer.commit_now("");
        assert_eq!(debouncer.elapsed(t.generation), None);
        assert_eq!(debouncer.committed(), "");
    }
}
