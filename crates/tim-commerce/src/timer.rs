//! Injected timers and clock readings.
//!
//! The storefront's only waits (the simulated newsletter request and the
//! detail-page retry loop) go through [`Sleeper`], so a browser shell can
//! back it with `setTimeout`, the CLI with tokio, and tests with a clock
//! that returns immediately.
//!
//! Deadlines (search debounce, the add-to-cart confirmation, newsletter
//! auto-dismiss) are compared against a [`Timestamp`] the host passes in.
//! `std::time::Instant` is not available on `wasm32-unknown-unknown`.

use std::cell::RefCell;
use std::ops::Add;
use std::time::Duration;

use async_trait::async_trait;

/// Something that can wait.
#[async_trait(?Send)]
pub trait Sleeper {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Returns immediately and records every requested wait.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    waits: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    /// A sleeper with no recorded waits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }

    /// Sum of all requested waits.
    pub fn total(&self) -> Duration {
        self.waits.borrow().iter().sum()
    }
}

#[async_trait(?Send)]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

/// A wall-clock reading in milliseconds, as returned by `Date.now()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// The current system time. Browser shells pass `Date.now()` to
    /// [`from_millis`](Self::from_millis) instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self(millis)
    }

    /// Time elapsed since `earlier`, zero if `earlier` is later.
    pub fn saturating_duration_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}
