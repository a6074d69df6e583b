use std::time::Duration;

/// Default number of attempts per call, first try included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff unit. Attempt `n` (0-based) waits `base * 2^n`.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Exponential backoff applied to every chat-completion call.
///
/// Only rate limiting (429) and unavailability (503) are retried; every
/// other status fails on the first response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after the failed attempt `attempt` (0-based):
    /// 1s, then 2s with the default base.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    pub fn is_retryable(status: u16) -> bool {
        matches!(status, 429 | 503)
    }
}
