//! Semantic Scholar API access
//!
//! [`client::ScholarClient`] wraps a [`Transport`] with the request governor:
//! every call goes through the shared [`crate::governor::Scheduler`], and
//! HTTP 429 responses feed the shared [`crate::governor::BackoffController`].

use async_trait::async_trait;
use serde_json::Value;

pub mod client;
pub mod config;
pub mod fields;
pub mod transport;
pub mod types;

pub use client::ScholarClient;
pub use config::ClientConfig;
pub use transport::HttpTransport;

/// HTTP status signalling that the caller exceeded the API rate limit
pub const THROTTLED_STATUS: u16 = 429;

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success response other than throttling; never retried
    #[error("Semantic Scholar API error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Throttling persisted past the retry ceiling
    #[error("Semantic Scholar API error ({status}): max retry attempts exceeded")]
    RetriesExhausted {
        /// HTTP status code of the last throttled response
        status: u16,
    },

    /// Connection, timeout or other transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Request could not be built from the given arguments
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::RetriesExhausted { status } => Some(*status),
            _ => None,
        }
    }

    /// Short explanation suitable for end users
    pub fn user_message(&self) -> String {
        match self.status_code() {
            Some(400) => "Invalid request parameters, please check the input".to_string(),
            Some(404) => "The requested paper or author was not found".to_string(),
            Some(429) => "Too many API requests, please try again later".to_string(),
            Some(500) => "Semantic Scholar server error, please try again later".to_string(),
            Some(_) => format!("API error: {self}"),
            None => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP method used by an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST with a JSON body
    Post,
}

/// Transport-agnostic description of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path segments below the base URL, percent-encoded by the transport
    pub segments: Vec<String>,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// JSON body for POST requests
    pub body: Option<Value>,
}

impl ApiRequest {
    /// GET request for the given path segments
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// POST request with a JSON body
    pub fn post<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Append a query parameter
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter when present
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Slash-joined path, for logging and metrics labels
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Raw response as seen by the retry loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl ApiResponse {
    /// Construct a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// HTTP 429
    pub fn is_throttled(&self) -> bool {
        self.status == THROTTLED_STATUS
    }
}

/// Executes a single API call without retries
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw status and body
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when no HTTP response was received
    async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse>;
}
