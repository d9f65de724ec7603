//! Governor configuration constants

use std::time::Duration;

/// Minimum spacing between request starts without an API key.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 5000;

/// Minimum spacing between request starts when an API key is configured.
pub const AUTHENTICATED_MIN_INTERVAL_MS: u64 = 2000;

/// Throttling signals tolerated per episode before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Delay applied to the first throttling signal of an episode.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Scheduler settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Minimum time between two consecutive admissions
    pub min_interval: Duration,
}

impl SchedulerConfig {
    /// Pick the spacing for anonymous or keyed access.
    pub fn for_credentials(has_api_key: bool) -> Self {
        let millis = if has_api_key {
            AUTHENTICATED_MIN_INTERVAL_MS
        } else {
            DEFAULT_MIN_INTERVAL_MS
        };
        Self {
            min_interval: Duration::from_millis(millis),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::for_credentials(false)
    }
}

/// Backoff settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Throttling signals answered with a delay before exhaustion
    pub max_attempts: u32,
    /// Delay for the first signal; doubles on each subsequent one
    pub base_delay: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

/// Exponential delay for the given zero-based attempt: `base * 2^attempt`.
///
/// Saturates at [`Duration::MAX`] instead of overflowing.
pub fn calculate_backoff(base_delay: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    base_delay.saturating_mul(factor)
}

/// Whole milliseconds in `duration` for log fields, clamped to `u64::MAX`
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
