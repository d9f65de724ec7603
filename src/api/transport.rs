//! reqwest-backed transport
//!
//! Performs exactly one HTTP exchange per call. Retrying and pacing belong to
//! [`super::ScholarClient`]; this layer only turns an [`ApiRequest`] into a
//! status code and body text.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::debug;

use super::config::ClientConfig;
use super::{ApiError, ApiRequest, ApiResponse, ApiResult, Method, Transport};
use crate::metrics::RequestMetrics;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

static SHARED_HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide HTTP client built with the default timeouts.
///
/// `reqwest::Client` pools connections internally, so handing out clones of
/// one instance lets every transport share that pool.
pub fn shared_http_client() -> ApiResult<Client> {
    SHARED_HTTP_CLIENT
        .get_or_try_init(|| build_http_client(&ClientConfig::default()))
        .cloned()
}

fn build_http_client(config: &ClientConfig) -> ApiResult<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))
}

/// Transport that talks to the real API over HTTPS
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport with its own HTTP client using the configured timeouts
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidArgument`] for an unusable base URL and
    /// [`ApiError::Network`] if the TLS backend cannot be initialised
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        // Custom timeouts need a dedicated client; otherwise reuse the shared pool
        let defaults = ClientConfig::default();
        let client = if config.connect_timeout == defaults.connect_timeout
            && config.request_timeout == defaults.request_timeout
        {
            shared_http_client()?
        } else {
            build_http_client(config)?
        };
        Self::with_client(client, &config.base_url, config.api_key.clone())
    }

    /// Build a transport around an existing HTTP client
    pub fn with_client(client: Client, base_url: &str, api_key: Option<String>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidArgument(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Full URL for a request; each segment is percent-encoded on its own
    pub fn url_for(&self, request: &ApiRequest) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidArgument(format!("base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url_for(request)?;
        let endpoint = request.path();

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        builder = builder.header(CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(endpoint = %endpoint, params = request.query.len(), "Sending request");
        let metrics = RequestMetrics::start(&endpoint);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics.record_network_error();
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        metrics.record_complete(status);
        let body = response.text().await?;

        Ok(ApiResponse::new(status, body))
    }
}
