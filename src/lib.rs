//! # Scholar Client Library
//!
//! A rate-governed client for the Semantic Scholar academic search API.
//!
//! The public API tolerates only a few requests per second per key and answers
//! bursts with HTTP 429. This crate keeps a client inside those limits:
//!
//! - **Serialized scheduling**: one request in flight at a time, with a fixed
//!   minimum spacing between request starts (5s anonymous, 2s with an API key)
//! - **Exponential backoff**: each 429 doubles the wait and pauses the whole
//!   queue, up to a fixed retry ceiling
//! - **Typed endpoints**: paper and author search, lookups, citations,
//!   references, batch retrieval and recommendations
//!
//! ## Quick Start
//!
//! ```no_run
//! use scholar_client::api::{ClientConfig, ScholarClient};
//! use scholar_client::api::client::PaperSearchParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ScholarClient::new(ClientConfig::from_env())?;
//!
//! let mut params = PaperSearchParams::new("transformer attention");
//! params.limit = Some(3);
//! let results = client.search_papers(&params).await?;
//!
//! for paper in results.data {
//!     println!("{} ({:?})", paper.title.unwrap_or_default(), paper.year);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`governor`] - Scheduler and backoff controller deciding when requests may run
//! - [`api`] - Transport, retry loop, endpoint methods and response models
//! - [`metrics`] - Request, throttling and backoff metrics
//! - [`cli`] - Command-line interface

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Command-line interface
pub mod cli;

/// Request scheduling and backoff
pub mod governor;

/// Semantic Scholar API client
pub mod api;

/// Metrics collection
pub mod metrics;

pub use api::{ApiError, ApiResult, ClientConfig, ScholarClient};
pub use governor::{BackoffConfig, BackoffController, RetryOutcome, Scheduler, SchedulerConfig};
