//! Request and backoff metrics
//!
//! Emitted through the `metrics` facade, so recording is a no-op until a
//! recorder is installed. [`init_metrics`] installs a Prometheus exporter with
//! an HTTP scrape endpoint.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::governor::config::duration_millis;

static METRICS_INITIALIZED: OnceCell<SocketAddr> = OnceCell::new();

/// Metrics setup errors
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Exporter could not be installed
    #[error("failed to install Prometheus exporter: {0}")]
    Install(String),
}

/// Install the Prometheus exporter on `addr`.
///
/// Idempotent: later calls return the address of the first installation.
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<SocketAddr, MetricsError> {
    METRICS_INITIALIZED
        .get_or_try_init(|| {
            PrometheusBuilder::new()
                .with_http_listener(addr)
                .install()
                .map_err(|e| MetricsError::Install(e.to_string()))?;
            describe_metrics();
            info!("Metrics exporter listening on {}", addr);
            Ok(addr)
        })
        .copied()
}

/// Whether [`init_metrics`] has succeeded
pub fn is_initialized() -> bool {
    METRICS_INITIALIZED.get().is_some()
}

fn describe_metrics() {
    describe_counter!(
        "scholar_requests_total",
        Unit::Count,
        "HTTP requests sent to the Semantic Scholar API"
    );
    describe_histogram!(
        "scholar_request_duration_seconds",
        Unit::Seconds,
        "HTTP request duration"
    );
    describe_counter!(
        "scholar_throttled_total",
        Unit::Count,
        "Responses with HTTP 429"
    );
    describe_counter!(
        "scholar_retries_total",
        Unit::Count,
        "Requests resubmitted after a backoff delay"
    );
    describe_histogram!(
        "scholar_backoff_duration_seconds",
        Unit::Seconds,
        "Backoff delay applied before resubmitting"
    );
    describe_counter!(
        "scholar_retries_exhausted_total",
        Unit::Count,
        "Requests that failed after reaching the retry ceiling"
    );
}

/// Timing for one HTTP exchange
pub struct RequestMetrics {
    endpoint: String,
    start_time: Instant,
}

impl RequestMetrics {
    /// Start timing a request to `endpoint`
    pub fn start(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            start_time: Instant::now(),
        }
    }

    /// Record a response with the given status
    pub fn record_complete(&self, status_code: u16) {
        let duration = self.start_time.elapsed();

        counter!(
            "scholar_requests_total",
            "endpoint" => self.endpoint.clone(),
            "status" => status_code.to_string(),
        )
        .increment(1);
        histogram!(
            "scholar_request_duration_seconds",
            "endpoint" => self.endpoint.clone(),
        )
        .record(duration.as_secs_f64());

        debug!(
            endpoint = %self.endpoint,
            status = status_code,
            duration_ms = duration_millis(duration),
            "HTTP request completed"
        );
    }

    /// Record a request that produced no response
    pub fn record_network_error(&self) {
        let duration = self.start_time.elapsed();

        counter!(
            "scholar_requests_total",
            "endpoint" => self.endpoint.clone(),
            "status" => "network_error",
        )
        .increment(1);

        warn!(
            endpoint = %self.endpoint,
            duration_ms = duration_millis(duration),
            "Network error recorded"
        );
    }
}

/// Record a 429 response
pub fn record_throttled(endpoint: &str) {
    counter!("scholar_throttled_total", "endpoint" => endpoint.to_string()).increment(1);
}

/// Record a backoff delay before resubmission
pub fn record_retry_backoff(delay: Duration, attempt: u32) {
    counter!("scholar_retries_total", "attempt" => attempt.to_string()).increment(1);
    histogram!("scholar_backoff_duration_seconds").record(delay.as_secs_f64());
}

/// Record a request abandoned at the retry ceiling
pub fn record_retries_exhausted(endpoint: &str) {
    counter!("scholar_retries_exhausted_total", "endpoint" => endpoint.to_string()).increment(1);
}
