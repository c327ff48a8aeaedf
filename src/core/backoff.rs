use std::time::Duration;

/// Exponential wait between retries of the same date: `base * 2^attempt`.
///
/// There is no cap and no jitter. With the default one-second base the waits
/// are 1s, 2s, 4s, 8s, ... so large retry counts get slow quickly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    /// Delay before the first retry.
    pub base: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
        }
    }
}

impl Backoff {
    pub fn new(base: Duration) -> Self {
        Self { base }
    }

    /// No waiting at all; handy for tests against a live mock server.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Delay to sleep after the failed attempt number `attempt` (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor)
    }

    /// Sum of every wait a date can incur with `max_retries` retries.
    pub fn total_delay(&self, max_retries: u32) -> Duration {
        (0..max_retries).fold(Duration::ZERO, |acc, attempt| {
            acc.saturating_add(self.delay(attempt))
        })
    }
}
