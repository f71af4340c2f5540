//! Trailing-edge debouncer for the search box.

use std::time::Duration;

use crate::timer::Timestamp;

/// Idle interval before a search is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest input until it has been idle for `delay`.
///
/// Each [`push`](Self::push) supersedes the pending value and restarts the
/// timer. Time is passed in explicitly so the host decides what a clock is.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Timestamp)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given idle interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The idle interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new input at `now`, replacing anything pending.
    pub fn push(&mut self, value: T, now: Timestamp) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Timestamp) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_idle() {
        let start = Timestamp::from_millis(10_000);
        let mut debouncer = Debouncer::default();
        debouncer.push("de", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), Some("de"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_keystroke_supersedes() {
        let start = Timestamp::from_millis(10_000);
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("d", start);
        debouncer.push("de", start + Duration::from_millis(200));
        debouncer.push("den", start + Duration::from_millis(400));

        assert_eq!(debouncer.poll(start + Duration::from_millis(650)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(700)), Some("den"));
    }

    #[test]
    fn test_cancel() {
        let start = Timestamp::from_millis(10_000);
        let mut debouncer = Debouncer::default();
        debouncer.push(String::from("tee"), start);
        assert_eq!(debouncer.cancel().as_deref(), Some("tee"));
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
