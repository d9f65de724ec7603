//! Serialized execution queue with spacing and pause support
//!
//! The scheduler admits one operation at a time, in submission order, and never
//! starts two operations closer together than its minimum interval. It can be
//! paused until a deadline; a later pause replaces the earlier deadline.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use super::config::{duration_millis, SchedulerConfig};

/// Pause length used when `now + duration` does not fit in an [`Instant`]
const MAX_PAUSE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Single-slot request scheduler (concurrency 1, fixed spacing)
pub struct Scheduler {
    min_interval: Duration,
    /// Fair lock held by the executing operation; stores its admission instant
    admission: AsyncMutex<Option<Instant>>,
    /// Admission is suspended while `now` is before this deadline
    paused_until: watch::Sender<Option<Instant>>,
    running: AtomicUsize,
    queued: AtomicUsize,
}

impl Scheduler {
    /// Create a scheduler that spaces admissions by `min_interval`
    pub fn new(min_interval: Duration) -> Self {
        let (paused_until, _) = watch::channel(None);
        Self {
            min_interval,
            admission: AsyncMutex::new(None),
            paused_until,
            running: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
        }
    }

    /// Create a scheduler from configuration
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.min_interval)
    }

    /// Configured spacing between admissions
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Run `op` once it is admitted and return its output unchanged.
    ///
    /// Operations are admitted in submission order. The returned future holds
    /// the single execution slot until `op` completes.
    pub async fn submit<F, Fut, T>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let waiting = CountGuard::enter(&self.queued);
        let mut last_admission = self.admission.lock().await;
        self.wait_for_admission(*last_admission).await;
        *last_admission = Some(Instant::now());
        drop(waiting);

        let _running = CountGuard::enter(&self.running);
        debug!(queued = self.queued(), "Operation admitted");
        op().await
    }

    async fn wait_for_admission(&self, last_admission: Option<Instant>) {
        let mut deadline_rx = self.paused_until.subscribe();
        loop {
            let deadline = *deadline_rx.borrow_and_update();
            if let Some(deadline) = deadline.filter(|d| Instant::now() < *d) {
                // A newer pause may move the deadline in either direction
                tokio::select! {
                    _ = sleep_until(deadline) => debug!("Scheduler pause elapsed"),
                    changed = deadline_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
                continue;
            }

            match last_admission.map(|at| at + self.min_interval) {
                Some(ready_at) if Instant::now() < ready_at => sleep_until(ready_at).await,
                _ => return,
            }
        }
    }

    /// Stop admitting operations for `duration`.
    ///
    /// In-flight work is not interrupted. Calling this while already paused
    /// replaces the deadline so admission restarts `duration` after the
    /// latest call. Does not require a running tokio runtime.
    pub fn pause(&self, duration: Duration) {
        let now = Instant::now();
        let deadline = now
            .checked_add(duration)
            .unwrap_or_else(|| now + MAX_PAUSE);
        self.paused_until.send_replace(Some(deadline));
        info!(duration_ms = duration_millis(duration), "Scheduler paused");
    }

    /// Whether admission is currently suspended
    pub fn is_paused(&self) -> bool {
        self.paused_until
            .borrow()
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Operations currently executing (0 or 1)
    pub fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Operations waiting for admission
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("min_interval", &self.min_interval)
            .field("paused", &self.is_paused())
            .field("pending", &self.pending())
            .field("queued", &self.queued())
            .finish()
    }
}

/// Increments a counter for as long as it is alive
struct CountGuard<'a>(&'a AtomicUsize);

impl<'a> CountGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for CountGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
