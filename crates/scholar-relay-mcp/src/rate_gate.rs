//! Process-wide request spacing.
//!
//! [`RateGate`] hands out permits no closer together than a fixed interval.
//! Callers share one gate through an `Arc` and call [`RateGate::acquire`]
//! immediately before each outbound request. The gate only tracks when
//! permits were issued; it knows nothing about the work done afterwards.
//!
//! The timestamp lives behind a `tokio::sync::Mutex`, which queues waiters
//! in FIFO order and can be held across the `.await` on the sleep. Waiting
//! therefore yields the executor while still keeping every other caller out
//! of the check-then-stamp sequence.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Serializes callers so that permits are at least `interval` apart.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,

    /// When the last permit was granted. `None` until the first grant.
    last_release: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate that spaces permits by `interval`.
    ///
    /// A zero interval never delays, but callers are still serialized.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_release: Mutex::new(None) }
    }

    /// Minimum spacing between two permits.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the caller may proceed, then record the grant.
    ///
    /// Never fails. If the returned future is dropped while sleeping, the
    /// lock guard is dropped with it and no grant is recorded.
    pub async fn acquire(&self) {
        let mut last_release = self.last_release.lock().await;

        if let Some(wait) = self.remaining_wait(*last_release, Instant::now()) {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate gate delaying request");
            tokio::time::sleep(wait).await;
        }

        *last_release = Some(Instant::now());
    }

    /// Blocking variant of [`acquire`](Self::acquire) for plain OS threads.
    ///
    /// Parks the current thread for the wait. Must not be called from
    /// inside an async runtime.
    pub fn acquire_blocking(&self) {
        let mut last_release = self.last_release.blocking_lock();

        if let Some(wait) = self.remaining_wait(*last_release, Instant::now()) {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate gate delaying request");
            std::thread::sleep(wait);
        }

        *last_release = Some(Instant::now());
    }

    /// Time still owed before the next permit, or `None` if it may go now.
    ///
    /// A last grant that appears to lie in the future (negative elapsed time)
    /// owes no wait.
    fn remaining_wait(&self, last_release: Option<Instant>, now: Instant) -> Option<Duration> {
        let elapsed = now.checked_duration_since(last_release?)?;
        self.interval.checked_sub(elapsed).filter(|wait| !wait.is_zero())
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(crate::config::api::RATE_LIMIT_INTERVAL)
    }
}
