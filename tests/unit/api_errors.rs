use scholar_client::api::{ApiError, ApiResponse};

fn status(status: u16) -> ApiError {
    ApiError::Status {
        status,
        body: "server said no".to_string(),
    }
}

#[test]
fn user_message_maps_known_statuses() {
    assert_eq!(
        status(400).user_message(),
        "Invalid request parameters, please check the input"
    );
    assert_eq!(
        status(404).user_message(),
        "The requested paper or author was not found"
    );
    assert_eq!(
        status(500).user_message(),
        "Semantic Scholar server error, please try again later"
    );
}

#[test]
fn exhausted_retries_read_as_rate_limiting() {
    let err = ApiError::RetriesExhausted { status: 429 };
    assert_eq!(
        err.to_string(),
        "Semantic Scholar API error (429): max retry attempts exceeded"
    );
    assert_eq!(
        err.user_message(),
        "Too many API requests, please try again later"
    );
}

#[test]
fn unknown_status_keeps_body() {
    let message = status(418).user_message();
    assert!(message.starts_with("API error: "));
    assert!(message.contains("(418)"));
    assert!(message.contains("server said no"));
}

#[test]
fn errors_without_status_use_display() {
    let err = ApiError::Network("connection reset".to_string());
    assert_eq!(err.status_code(), None);
    assert_eq!(err.user_message(), "network error: connection reset");

    let err = ApiError::InvalidArgument("query must not be empty".to_string());
    assert_eq!(err.user_message(), "invalid argument: query must not be empty");
}

#[test]
fn response_classification() {
    assert!(ApiResponse::new(200, "{}").is_success());
    assert!(ApiResponse::new(204, "").is_success());
    assert!(!ApiResponse::new(404, "").is_success());

    let throttled = ApiResponse::new(429, "");
    assert!(throttled.is_throttled());
    assert!(!throttled.is_success());
}
