//! Exponential backoff controller for throttling signals
//!
//! Every throttling signal within an episode doubles the delay, pauses the
//! associated [`Scheduler`] for that long, and counts towards a fixed ceiling.
//! A successful request ends the episode via [`BackoffController::reset`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

use super::config::{calculate_backoff, duration_millis, BackoffConfig};
use super::scheduler::Scheduler;

/// Decision returned for a throttling signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Wait this long, then resubmit the request
    Delay(Duration),
    /// Retry ceiling reached; the request must fail
    Exhausted,
}

impl RetryOutcome {
    /// The delay, if the outcome permits another attempt
    pub fn delay(self) -> Option<Duration> {
        match self {
            Self::Delay(delay) => Some(delay),
            Self::Exhausted => None,
        }
    }

    /// Whether the retry ceiling has been reached
    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Attempt counter shared by every request issued through one client
#[derive(Debug)]
pub struct BackoffController {
    scheduler: Arc<Scheduler>,
    config: BackoffConfig,
    attempts: Mutex<u32>,
}

impl BackoffController {
    /// Create a controller that pauses `scheduler` on each throttling signal
    pub fn new(scheduler: Arc<Scheduler>, config: BackoffConfig) -> Self {
        Self {
            scheduler,
            config,
            attempts: Mutex::new(0),
        }
    }

    /// Record a throttling signal.
    ///
    /// Returns [`RetryOutcome::Exhausted`] without touching any state once
    /// `max_attempts` signals have been seen in this episode. Otherwise returns
    /// `base_delay * 2^attempts`, advances the counter and pauses the scheduler
    /// for the same duration.
    pub fn on_throttled(&self) -> RetryOutcome {
        let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        if *attempts >= self.config.max_attempts {
            warn!(
                attempts = *attempts,
                max_attempts = self.config.max_attempts,
                "Retry ceiling reached"
            );
            return RetryOutcome::Exhausted;
        }

        let delay = calculate_backoff(self.config.base_delay, *attempts);
        *attempts += 1;
        self.scheduler.pause(delay);

        debug!(
            attempt = *attempts,
            max_attempts = self.config.max_attempts,
            delay_ms = duration_millis(delay),
            "Backing off after throttling"
        );
        RetryOutcome::Delay(delay)
    }

    /// End the current episode
    pub fn reset(&self) {
        let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        if *attempts > 0 {
            debug!(attempts = *attempts, "Backoff reset");
        }
        *attempts = 0;
    }

    /// Throttling signals seen in the current episode
    pub fn current_attempts(&self) -> u32 {
        *self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configured retry ceiling
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Configured first-attempt delay
    pub fn base_delay(&self) -> Duration {
        self.config.base_delay
    }

    /// Scheduler paused by this controller
    pub fn scheduler(&self) -> &Arc<Scheduler> {
        &self.scheduler
    }
}
