//! Request pacing.

use std::time::Duration;

/// Fixed-interval throttle.
///
/// Every call to [`Pacer::wait`] suspends for the configured interval. One
/// pacer is owned by each rate-limited caller (the line translator, the
/// chapter loop) so all of that caller's requests share the same ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// A pacer that never sleeps.
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn wait(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}
