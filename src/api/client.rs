//! Governed Semantic Scholar client
//!
//! Every endpoint method builds an [`ApiRequest`] and hands it to
//! [`ScholarClient::execute`], which owns the retry loop:
//!
//! - each attempt is submitted to the shared [`Scheduler`]
//! - HTTP 429 asks the shared [`BackoffController`] for a delay, waits it out
//!   and resubmits; exhaustion fails the request
//! - any other non-2xx status fails immediately, without retry
//! - a 2xx response resets the backoff episode and is decoded as JSON
//!
//! Clones share the scheduler and the attempt counter, so throttling seen by one
//! request lengthens the next backoff for every other request on the client.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::ClientConfig;
use super::transport::HttpTransport;
use super::types::{
    Author, AuthorPapersResponse, AuthorSearchResponse, CitationsResponse, Paper,
    PaperSearchResponse, RecommendationsResponse, ReferencesResponse,
};
use super::{ApiError, ApiRequest, ApiResult, Transport};
use crate::governor::config::duration_millis;
use crate::governor::{BackoffController, RetryOutcome, Scheduler};
use crate::metrics;

/// Paper search filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperSearchParams {
    /// Free-text query
    pub query: String,
    /// Comma-separated field list
    pub fields: Option<String>,
    /// Publication year or range, e.g. `2019` or `2016-2020`
    pub year: Option<String>,
    /// Only papers with an open-access PDF
    pub open_access_pdf: bool,
    /// Minimum citation count
    pub min_citation_count: Option<u32>,
    /// Fields of study, e.g. `Computer Science`
    pub fields_of_study: Vec<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Page offset
    pub offset: Option<u32>,
}

impl PaperSearchParams {
    /// Search for `query` with no filters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Author search filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSearchParams {
    /// Author name query
    pub query: String,
    /// Comma-separated field list
    pub fields: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Page offset
    pub offset: Option<u32>,
}

impl AuthorSearchParams {
    /// Search for `query` with default paging
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Paging for citation, reference and author-paper listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Comma-separated field list
    pub fields: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Page offset
    pub offset: Option<u32>,
}

/// Recommendation seeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationParams {
    /// Papers to find similar work for
    pub positive_paper_ids: Vec<String>,
    /// Papers to steer away from
    pub negative_paper_ids: Vec<String>,
    /// Comma-separated field list
    pub fields: Option<String>,
    /// Number of recommendations
    pub limit: Option<u32>,
}

/// Semantic Scholar client with shared pacing and backoff
#[derive(Clone)]
pub struct ScholarClient {
    transport: Arc<dyn Transport>,
    scheduler: Arc<Scheduler>,
    backoff: Arc<BackoffController>,
    config: ClientConfig,
}

impl ScholarClient {
    /// Client over HTTPS using `config`
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client configured from `SEMANTIC_SCHOLAR_API_KEY` / `SEMANTIC_SCHOLAR_BASE_URL`
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Client over an arbitrary transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let scheduler = Arc::new(Scheduler::from_config(&config.scheduler));
        let backoff = Arc::new(BackoffController::new(Arc::clone(&scheduler), config.backoff));
        Self {
            transport,
            scheduler,
            backoff,
            config,
        }
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared scheduler, for diagnostics
    pub fn scheduler(&self) -> &Arc<Scheduler> {
        &self.scheduler
    }

    /// Shared backoff controller, for diagnostics
    pub fn backoff(&self) -> &Arc<BackoffController> {
        &self.backoff
    }

    /// Run one logical request to completion and decode its JSON body.
    ///
    /// # Errors
    /// - [`ApiError::RetriesExhausted`] when throttling outlasts the retry ceiling
    /// - [`ApiError::Status`] for any other non-success status
    /// - [`ApiError::Network`] when the transport fails
    /// - [`ApiError::Parse`] when the body does not match `T`
    pub async fn execute<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = request.path();

        loop {
            let response = self
                .scheduler
                .submit(|| self.transport.send(&request))
                .await?;

            if response.is_throttled() {
                metrics::record_throttled(&endpoint);

                match self.backoff.on_throttled() {
                    RetryOutcome::Exhausted => {
                        metrics::record_retries_exhausted(&endpoint);
                        warn!(
                            endpoint = %endpoint,
                            max_attempts = self.backoff.max_attempts(),
                            "Rate limit persisted, giving up"
                        );
                        return Err(ApiError::RetriesExhausted {
                            status: response.status,
                        });
                    }
                    RetryOutcome::Delay(delay) => {
                        let attempt = self.backoff.current_attempts();
                        metrics::record_retry_backoff(delay, attempt);
                        warn!(
                            endpoint = %endpoint,
                            attempt = attempt,
                            max_attempts = self.backoff.max_attempts(),
                            delay_ms = duration_millis(delay),
                            "Rate limited (429), retrying after backoff"
                        );
                        sleep(delay).await;
                        continue;
                    }
                }
            }

            if !response.is_success() {
                debug!(endpoint = %endpoint, status = response.status, "Request failed");
                return Err(ApiError::Status {
                    status: response.status,
                    body: response.body,
                });
            }

            self.backoff.reset();
            return serde_json::from_str(&response.body).map_err(|e| {
                ApiError::Parse(format!("failed to deserialize {endpoint} response: {e}"))
            });
        }
    }

    /// Relevance search over papers
    pub async fn search_papers(&self, params: &PaperSearchParams) -> ApiResult<PaperSearchResponse> {
        require_non_empty("query", &params.query)?;

        let fields_of_study =
            (!params.fields_of_study.is_empty()).then(|| params.fields_of_study.join(","));
        let request = ApiRequest::get(["graph", "v1", "paper", "search"])
            .param("query", &params.query)
            .param_opt("fields", params.fields.as_deref())
            .param_opt("year", params.year.as_deref())
            .param_opt("openAccessPdf", params.open_access_pdf.then_some("true"))
            .param_opt("minCitationCount", non_zero(params.min_citation_count))
            .param_opt("fieldsOfStudy", fields_of_study)
            .param_opt("limit", non_zero(params.limit))
            .param_opt("offset", non_zero(params.offset));

        self.execute(request).await
    }

    /// Single paper by any supported identifier (`DOI:…`, `ARXIV:…`, S2 ID)
    pub async fn get_paper(&self, paper_id: &str, fields: Option<&str>) -> ApiResult<Paper> {
        require_non_empty("paper_id", paper_id)?;
        let request =
            ApiRequest::get(["graph", "v1", "paper", paper_id]).param_opt("fields", fields);
        self.execute(request).await
    }

    /// Papers citing `paper_id`
    pub async fn get_paper_citations(
        &self,
        paper_id: &str,
        params: &PageParams,
    ) -> ApiResult<CitationsResponse> {
        require_non_empty("paper_id", paper_id)?;
        let request = paged(ApiRequest::get(["graph", "v1", "paper", paper_id, "citations"]), params);
        self.execute(request).await
    }

    /// Papers referenced by `paper_id`
    pub async fn get_paper_references(
        &self,
        paper_id: &str,
        params: &PageParams,
    ) -> ApiResult<ReferencesResponse> {
        require_non_empty("paper_id", paper_id)?;
        let request = paged(ApiRequest::get(["graph", "v1", "paper", paper_id, "references"]), params);
        self.execute(request).await
    }

    /// Several papers in one call; unknown IDs come back as `None`
    pub async fn batch_get_papers(
        &self,
        paper_ids: &[String],
        fields: Option<&str>,
    ) -> ApiResult<Vec<Option<Paper>>> {
        if paper_ids.is_empty() {
            return Err(ApiError::InvalidArgument(
                "at least one paper ID is required".to_string(),
            ));
        }
        let request = ApiRequest::post(["graph", "v1", "paper", "batch"], json!({ "ids": paper_ids }))
            .param_opt("fields", fields);
        self.execute(request).await
    }

    /// Name search over authors
    pub async fn search_authors(
        &self,
        params: &AuthorSearchParams,
    ) -> ApiResult<AuthorSearchResponse> {
        require_non_empty("query", &params.query)?;
        let request = ApiRequest::get(["graph", "v1", "author", "search"])
            .param("query", &params.query)
            .param_opt("fields", params.fields.as_deref())
            .param_opt("limit", non_zero(params.limit))
            .param_opt("offset", non_zero(params.offset));
        self.execute(request).await
    }

    /// Single author
    pub async fn get_author(&self, author_id: &str, fields: Option<&str>) -> ApiResult<Author> {
        require_non_empty("author_id", author_id)?;
        let request =
            ApiRequest::get(["graph", "v1", "author", author_id]).param_opt("fields", fields);
        self.execute(request).await
    }

    /// Papers written by `author_id`
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        params: &PageParams,
    ) -> ApiResult<AuthorPapersResponse> {
        require_non_empty("author_id", author_id)?;
        let request = paged(ApiRequest::get(["graph", "v1", "author", author_id, "papers"]), params);
        self.execute(request).await
    }

    /// Papers similar to the positive seeds and unlike the negative ones
    pub async fn get_recommendations(
        &self,
        params: &RecommendationParams,
    ) -> ApiResult<RecommendationsResponse> {
        if params.positive_paper_ids.is_empty() {
            return Err(ApiError::InvalidArgument(
                "at least one positive paper ID is required".to_string(),
            ));
        }
        let body = json!({
            "positivePaperIds": params.positive_paper_ids,
            "negativePaperIds": params.negative_paper_ids,
        });
        let request = ApiRequest::post(["recommendations", "v1", "papers"], body)
            .param_opt("fields", params.fields.as_deref())
            .param_opt("limit", non_zero(params.limit));
        self.execute(request).await
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("base_url", &self.config.base_url)
            .field("scheduler", &self.scheduler)
            .field("attempts", &self.backoff.current_attempts())
            .finish()
    }
}

fn paged(request: ApiRequest, params: &PageParams) -> ApiRequest {
    request
        .param_opt("fields", params.fields.as_deref())
        .param_opt("limit", non_zero(params.limit))
        .param_opt("offset", non_zero(params.offset))
}

/// Zero means "unset" for counts and paging.
fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

fn require_non_empty(name: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}
