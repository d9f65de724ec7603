//! CLI error types and conversions

use crate::api::ApiError;
use crate::metrics::MetricsError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// API error
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// Metrics exporter error
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Output serialization error
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
