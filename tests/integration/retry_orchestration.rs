//! Integration tests for the client retry loop over a scripted transport

use async_trait::async_trait;
use scholar_client::api::client::PaperSearchParams;
use scholar_client::api::types::Paper;
use scholar_client::api::{ApiError, ApiRequest, ApiResponse, ApiResult, Transport};
use scholar_client::governor::BackoffConfig;
use scholar_client::{ClientConfig, ScholarClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

const PAPER_BODY: &str = r#"{"paperId": "p1", "title": "Attention is All you Need"}"#;

/// Replays queued outcomes in order, then answers 200 with a paper
struct ScriptedTransport {
    script: Mutex<VecDeque<ApiResult<ApiResponse>>>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    fn new(script: Vec<ApiResult<ApiResponse>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.calls.lock().unwrap().push(Instant::now());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, PAPER_BODY)))
    }
}

fn throttled() -> ApiResult<ApiResponse> {
    Ok(ApiResponse::new(429, "Too Many Requests"))
}

fn ok_paper() -> ApiResult<ApiResponse> {
    Ok(ApiResponse::new(200, PAPER_BODY))
}

fn client(transport: Arc<ScriptedTransport>, max_attempts: u32, base_delay_ms: u64) -> ScholarClient {
    let config = ClientConfig::new()
        .base_url("http://localhost:1")
        .min_interval(Duration::from_millis(10))
        .backoff(BackoffConfig {
            max_attempts,
            base_delay: Duration::from_millis(base_delay_ms),
        });
    ScholarClient::with_transport(config, transport)
}

#[tokio::test]
async fn test_success_without_throttling() {
    let transport = ScriptedTransport::new(vec![ok_paper()]);
    let client = client(transport.clone(), 5, 20);

    let paper: Paper = client.get_paper("p1", None).await.unwrap();
    assert_eq!(paper.paper_id, "p1");
    assert_eq!(transport.call_count(), 1);
    assert_eq!(client.backoff().current_attempts(), 0);
}

#[tokio::test]
async fn test_throttled_requests_are_retried_then_reset() {
    let transport = ScriptedTransport::new(vec![throttled(), throttled(), ok_paper()]);
    let client = client(transport.clone(), 5, 20);

    let start = Instant::now();
    let paper = client.get_paper("p1", None).await.unwrap();
    assert_eq!(paper.title.as_deref(), Some("Attention is All you Need"));
    assert_eq!(transport.call_count(), 3);

    // Waited at least 20ms + 40ms of backoff
    assert!(start.elapsed() >= Duration::from_millis(60));

    let times = transport.call_times();
    assert!(times[1] - times[0] >= Duration::from_millis(20));
    assert!(times[2] - times[1] >= Duration::from_millis(40));

    // Success ends the episode
    assert_eq!(client.backoff().current_attempts(), 0);
}

#[tokio::test]
async fn test_exhaustion_surfaces_terminal_error() {
    let transport = ScriptedTransport::new(vec![throttled(), throttled(), throttled()]);
    let client = client(transport.clone(), 2, 10);

    let err = client.get_paper("p1", None).await.unwrap_err();
    assert!(matches!(err, ApiError::RetriesExhausted { status: 429 }));
    assert_eq!(err.status_code(), Some(429));
    assert!(err.to_string().contains("max retry attempts exceeded"));

    // Initial attempt plus two retries
    assert_eq!(transport.call_count(), 3);
    assert_eq!(client.backoff().current_attempts(), 2);
}

#[tokio::test]
async fn test_zero_attempts_fails_on_first_throttle() {
    let transport = ScriptedTransport::new(vec![throttled()]);
    let client = client(transport.clone(), 0, 10);

    let err = client.get_paper("p1", None).await.unwrap_err();
    assert!(matches!(err, ApiError::RetriesExhausted { .. }));
    assert_eq!(transport.call_count(), 1);
    assert!(!client.scheduler().is_paused());
}

#[tokio::test]
async fn test_non_throttling_failure_is_not_retried() {
    let transport = ScriptedTransport::new(vec![Ok(ApiResponse::new(404, "Paper not found"))]);
    let client = client(transport.clone(), 5, 10);

    let err = client.get_paper("missing", None).await.unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "Paper not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.call_count(), 1);
    assert_eq!(client.backoff().current_attempts(), 0);
    assert!(!client.scheduler().is_paused());
}

#[tokio::test]
async fn test_non_throttling_failure_keeps_attempt_count() {
    let transport = ScriptedTransport::new(vec![
        throttled(),
        Ok(ApiResponse::new(500, "Internal error")),
    ]);
    let client = client(transport.clone(), 5, 10);

    let err = client.get_paper("p1", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(transport.call_count(), 2);
    assert_eq!(client.backoff().current_attempts(), 1);
}

#[tokio::test]
async fn test_transport_errors_propagate_without_retry() {
    let transport = ScriptedTransport::new(vec![Err(ApiError::Network(
        "connection refused".to_string(),
    ))]);
    let client = client(transport.clone(), 5, 10);

    let err = client.get_paper("p1", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(ref msg) if msg == "connection refused"));
    assert_eq!(transport.call_count(), 1);
    assert_eq!(client.backoff().current_attempts(), 0);
}

#[tokio::test]
async fn test_attempt_counter_is_shared_across_requests() {
    // Request A is throttled and then fails with 404, leaving the episode open
    let transport = ScriptedTransport::new(vec![
        throttled(),
        Ok(ApiResponse::new(404, "Not found")),
        throttled(),
        ok_paper(),
    ]);
    let client = client(transport.clone(), 5, 20);

    assert!(client.get_paper("a", None).await.is_err());
    assert_eq!(client.backoff().current_attempts(), 1);

    // Request B's first throttle continues the same episode: 40ms, not 20ms
    client.get_paper("b", None).await.unwrap();
    let times = transport.call_times();
    assert!(times[3] - times[2] >= Duration::from_millis(40));
    assert_eq!(client.backoff().current_attempts(), 0);
}

#[tokio::test]
async fn test_clones_share_governor() {
    let transport = ScriptedTransport::new(vec![throttled()]);
    let client = client(transport.clone(), 5, 50);
    let clone = client.clone();

    assert!(Arc::ptr_eq(client.scheduler(), clone.scheduler()));
    assert!(Arc::ptr_eq(client.backoff(), clone.backoff()));

    let (a, b) = tokio::join!(client.get_paper("a", None), clone.get_paper("b", None));
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_search_decodes_page() {
    let transport = ScriptedTransport::new(vec![Ok(ApiResponse::new(
        200,
        r#"{"total": 2, "offset": 0, "data": [{"paperId": "p1"}, {"paperId": "p2"}]}"#,
    ))]);
    let client = client(transport.clone(), 5, 10);

    let response = client
        .search_papers(&PaperSearchParams::new("attention"))
        .await
        .unwrap();
    assert_eq!(response.total, 2);
    assert_eq!(response.data.len(), 2);
}
