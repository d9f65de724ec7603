//! Client configuration

use std::time::Duration;

use crate::governor::{BackoffConfig, SchedulerConfig};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "SEMANTIC_SCHOLAR_BASE_URL";

/// HTTP connect timeout (seconds)
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP request timeout (seconds)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings for one [`super::ScholarClient`], immutable once the client is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without trailing path
    pub base_url: String,
    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,
    /// Scheduler spacing
    pub scheduler: SchedulerConfig,
    /// Backoff ceiling and base delay
    pub backoff: BackoffConfig,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Anonymous configuration against the production API
    pub fn new() -> Self {
        Self::with_api_key(None)
    }

    /// Configuration whose scheduler spacing follows the presence of a key
    pub fn with_api_key(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            scheduler: SchedulerConfig::for_credentials(api_key.is_some()),
            api_key,
            backoff: BackoffConfig::default(),
            connect_timeout: Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Read the API key and base URL from the environment
    pub fn from_env() -> Self {
        let mut config = Self::with_api_key(std::env::var(API_KEY_ENV).ok());
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    /// Override the API root
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the scheduler spacing
    pub fn min_interval(mut self, min_interval: Duration) -> Self {
        self.scheduler.min_interval = min_interval;
        self
    }

    /// Override the backoff policy
    pub fn backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    /// Whether requests carry an API key
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
