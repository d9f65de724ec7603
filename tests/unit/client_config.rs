use std::time::Duration;

use scholar_client::api::config::{
    DEFAULT_BASE_URL, HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS,
};
use scholar_client::governor::config::{
    AUTHENTICATED_MIN_INTERVAL_MS, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MIN_INTERVAL_MS,
};
use scholar_client::governor::BackoffConfig;
use scholar_client::{ClientConfig, ScholarClient};

#[test]
fn anonymous_defaults() {
    let config = ClientConfig::new();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(!config.has_api_key());
    assert_eq!(
        config.scheduler.min_interval,
        Duration::from_millis(DEFAULT_MIN_INTERVAL_MS)
    );
    assert_eq!(config.backoff.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(
        config.backoff.base_delay,
        Duration::from_millis(DEFAULT_BASE_DELAY_MS)
    );
    assert_eq!(
        config.connect_timeout,
        Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS)
    );
    assert_eq!(
        config.request_timeout,
        Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS)
    );
}

#[test]
fn api_key_shortens_spacing() {
    let config = ClientConfig::with_api_key(Some("secret".to_string()));
    assert!(config.has_api_key());
    assert_eq!(
        config.scheduler.min_interval,
        Duration::from_millis(AUTHENTICATED_MIN_INTERVAL_MS)
    );
}

#[test]
fn blank_api_key_is_anonymous() {
    let config = ClientConfig::with_api_key(Some("   ".to_string()));
    assert!(!config.has_api_key());
    assert_eq!(
        config.scheduler.min_interval,
        Duration::from_millis(DEFAULT_MIN_INTERVAL_MS)
    );
}

#[tokio::test]
async fn client_is_built_from_config() {
    let config = ClientConfig::new()
        .base_url("http://localhost:8080/mirror")
        .min_interval(Duration::from_millis(250))
        .backoff(BackoffConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        });

    let client = ScholarClient::new(config).unwrap();
    assert_eq!(client.scheduler().min_interval(), Duration::from_millis(250));
    assert_eq!(client.backoff().max_attempts(), 3);
    assert_eq!(client.backoff().base_delay(), Duration::from_millis(100));
    assert_eq!(client.backoff().current_attempts(), 0);
    assert_eq!(client.scheduler().pending(), 0);
}

#[test]
fn invalid_base_url_is_rejected() {
    let config = ClientConfig::new().base_url("not a url");
    assert!(ScholarClient::new(config).is_err());
}
