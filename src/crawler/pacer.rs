//! Politeness pacing between consecutive fetches

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Enforces a minimum delay between the end of one fetch and the start of the next
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_fetch: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fetch: None,
        }
    }

    /// Records that a fetch just finished
    pub fn record_fetch(&mut self) {
        self.last_fetch = Some(Instant::now());
    }

    /// Returns how long to wait before the next fetch may start
    ///
    /// # Arguments
    ///
    /// * `now` - The current time
    ///
    /// # Returns
    ///
    /// * `Some(Duration)` - Time remaining until the delay has elapsed
    /// * `None` - A fetch may start now
    pub fn time_until_next_fetch(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fetch?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.delay {
            Some(self.delay - elapsed)
        } else {
            None
        }
    }

    /// Waits out the remaining delay
    ///
    /// # Returns
    ///
    /// `false` if the wait was interrupted by cancellation
    pub async fn wait(&self, cancel: &CancellationToken) -> bool {
        let Some(remaining) = self.time_until_next_fetch(Instant::now()) else {
            return !cancel.is_cancelled();
        };

        tracing::trace!("Waiting {:?} before next fetch", remaining);
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(remaining) => true,
        }
    }
}
