//! Request governor: scheduling and backoff
//!
//! Two cooperating components decide when a request may leave the process:
//!
//! 1. [`scheduler::Scheduler`] runs one operation at a time, spaced by a fixed
//!    minimum interval, and can be paused for a duration.
//! 2. [`backoff::BackoffController`] turns throttling signals into
//!    exponentially growing delays, pauses the scheduler for each one, and
//!    reports exhaustion once its attempt ceiling is reached.
//!
//! Both are plain values so each client (or test) owns independent instances.
//! All requests issued through one client share the same queue and the same
//! attempt counter.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use scholar_client::governor::{BackoffConfig, BackoffController, RetryOutcome, Scheduler};
//!
//! # async fn example() {
//! let scheduler = Arc::new(Scheduler::new(Duration::from_secs(5)));
//! let backoff = BackoffController::new(scheduler.clone(), BackoffConfig::default());
//!
//! let status = scheduler.submit(|| async { 429u16 }).await;
//! if status == 429 {
//!     match backoff.on_throttled() {
//!         RetryOutcome::Delay(delay) => tokio::time::sleep(delay).await,
//!         RetryOutcome::Exhausted => return,
//!     }
//! } else {
//!     backoff.reset();
//! }
//! # }
//! ```

pub mod backoff;
pub mod config;
pub mod scheduler;

pub use backoff::{BackoffController, RetryOutcome};
pub use config::{BackoffConfig, SchedulerConfig};
pub use scheduler::Scheduler;
