//! Command definitions and dispatch

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::{render, CliError};
use crate::api::client::{AuthorSearchParams, PageParams, PaperSearchParams, RecommendationParams};
use crate::api::config::{API_KEY_ENV, BASE_URL_ENV};
use crate::api::fields::{
    build_fields_param, DEFAULT_AUTHOR_FIELDS, DEFAULT_CITATION_FIELDS, DEFAULT_PAPER_FIELDS,
};
use crate::api::{ClientConfig, ScholarClient};
use crate::governor::config::{duration_millis, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use crate::governor::BackoffConfig;
use crate::metrics;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}. Valid options: json, human")),
        }
    }
}

/// Semantic Scholar command-line client
#[derive(Parser, Debug)]
#[command(name = "scholar-client")]
#[command(about = "Query the Semantic Scholar API within its rate limits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// API key; shortens the request spacing from 5s to 2s
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Minimum spacing between request starts in milliseconds (overrides the key-based default)
    #[arg(long, global = true)]
    pub min_interval_ms: Option<u64>,

    /// Throttled responses tolerated before giving up (0-20)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(0..=20))]
    pub max_attempts: u32,

    /// Backoff delay after the first throttled response, doubled on each further one
    #[arg(long, global = true, default_value_t = DEFAULT_BASE_DELAY_MS)]
    pub base_delay_ms: u64,

    /// Output format (json or human)
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9090)
    #[arg(long, global = true)]
    pub metrics_addr: Option<SocketAddr>,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search papers by keyword
    SearchPapers(SearchPapersArgs),

    /// Show one paper
    Paper(LookupArgs),

    /// List papers citing a paper
    Citations(ListingArgs),

    /// List papers referenced by a paper
    References(ListingArgs),

    /// Fetch several papers at once
    Batch(BatchArgs),

    /// Search authors by name
    SearchAuthors(SearchAuthorsArgs),

    /// Show one author
    Author(LookupArgs),

    /// List papers written by an author
    AuthorPapers(ListingArgs),

    /// Recommend papers similar to the given ones
    Recommend(RecommendArgs),
}

/// Paging and field selection shared by listing commands
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Number of results
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: u32,

    /// Result offset
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Comma-separated fields to request
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Paper search arguments
#[derive(Args, Debug)]
pub struct SearchPapersArgs {
    /// Search keywords
    pub query: String,

    /// Publication year or range, e.g. 2023 or 2020-2024
    #[arg(long)]
    pub year: Option<String>,

    /// Comma-separated fields of study, e.g. "Computer Science,Medicine"
    #[arg(long, value_delimiter = ',')]
    pub fields_of_study: Vec<String>,

    /// Minimum citation count
    #[arg(long)]
    pub min_citation_count: Option<u32>,

    /// Only papers with an open-access PDF
    #[arg(long, default_value_t = false)]
    pub open_access_pdf: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Single-record lookup arguments
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Paper or author identifier
    pub id: String,

    /// Comma-separated fields to request
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Per-record listing arguments
#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Paper or author identifier
    pub id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Batch lookup arguments
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Paper identifiers
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Comma-separated fields to request
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Author search arguments
#[derive(Args, Debug)]
pub struct SearchAuthorsArgs {
    /// Author name
    pub query: String,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Recommendation arguments
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Comma-separated paper IDs to find similar work for
    #[arg(long, required = true, value_delimiter = ',')]
    pub positive: Vec<String>,

    /// Comma-separated paper IDs to steer away from
    #[arg(long, value_delimiter = ',')]
    pub negative: Vec<String>,

    /// Number of recommendations
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub limit: u32,

    /// Comma-separated fields to request
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

impl PageArgs {
    fn to_params(&self, defaults: &[&str]) -> PageParams {
        PageParams {
            fields: Some(build_fields_param(&self.fields, defaults)),
            limit: Some(self.limit),
            offset: Some(self.offset),
        }
    }
}

impl Cli {
    /// Client configuration derived from the global flags
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::with_api_key(self.api_key.clone());
        if let Some(base_url) = &self.base_url {
            config = config.base_url(base_url.clone());
        }
        if let Some(min_interval_ms) = self.min_interval_ms {
            config = config.min_interval(Duration::from_millis(min_interval_ms));
        }
        config.backoff(BackoffConfig {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
        })
    }

    /// Build a client from the flags, run the command and print its output
    pub async fn execute(&self) -> Result<(), CliError> {
        if let Some(addr) = self.metrics_addr {
            metrics::init_metrics(addr)?;
        }

        let config = self.client_config();
        info!(
            base_url = %config.base_url,
            authenticated = config.has_api_key(),
            min_interval_ms = duration_millis(config.scheduler.min_interval),
            "Starting request"
        );
        let client = ScholarClient::new(config)?;

        let output = self.run(&client).await?;
        println!("{output}");
        Ok(())
    }

    /// Run the command against `client` and return the formatted output
    pub async fn run(&self, client: &ScholarClient) -> Result<String, CliError> {
        match &self.command {
            Commands::SearchPapers(args) => {
                let params = PaperSearchParams {
                    query: args.query.clone(),
                    fields: Some(build_fields_param(&args.page.fields, DEFAULT_PAPER_FIELDS)),
                    year: args.year.clone(),
                    open_access_pdf: args.open_access_pdf,
                    min_citation_count: args.min_citation_count,
                    fields_of_study: args.fields_of_study.clone(),
                    limit: Some(args.page.limit),
                    offset: Some(args.page.offset),
                };
                let response = client.search_papers(&params).await?;
                self.emit(&response, || render::paper_search(&response, args.page.offset))
            }
            Commands::Paper(args) => {
                let fields = build_fields_param(&args.fields, DEFAULT_PAPER_FIELDS);
                let paper = client.get_paper(&args.id, Some(fields.as_str())).await?;
                self.emit(&paper, || render::paper_detail(&paper))
            }
            Commands::Citations(args) => {
                let params = args.page.to_params(DEFAULT_CITATION_FIELDS);
                let response = client.get_paper_citations(&args.id, &params).await?;
                self.emit(&response, || {
                    let papers: Vec<_> = response.data.iter().map(|c| &c.citing_paper).collect();
                    render::paper_list("citing papers", &papers, args.page.offset)
                })
            }
            Commands::References(args) => {
                let params = args.page.to_params(DEFAULT_CITATION_FIELDS);
                let response = client.get_paper_references(&args.id, &params).await?;
                self.emit(&response, || {
                    let papers: Vec<_> = response.data.iter().map(|r| &r.cited_paper).collect();
                    render::paper_list("references", &papers, args.page.offset)
                })
            }
            Commands::Batch(args) => {
                let fields = build_fields_param(&args.fields, DEFAULT_PAPER_FIELDS);
                let papers = client.batch_get_papers(&args.ids, Some(fields.as_str())).await?;
                self.emit(&papers, || render::batch(&args.ids, &papers))
            }
            Commands::SearchAuthors(args) => {
                let params = AuthorSearchParams {
                    query: args.query.clone(),
                    fields: Some(build_fields_param(&args.page.fields, DEFAULT_AUTHOR_FIELDS)),
                    limit: Some(args.page.limit),
                    offset: Some(args.page.offset),
                };
                let response = client.search_authors(&params).await?;
                self.emit(&response, || render::author_search(&response, args.page.offset))
            }
            Commands::Author(args) => {
                let fields = build_fields_param(&args.fields, DEFAULT_AUTHOR_FIELDS);
                let author = client.get_author(&args.id, Some(fields.as_str())).await?;
                self.emit(&author, || render::author_detail(&author))
            }
            Commands::AuthorPapers(args) => {
                let params = args.page.to_params(DEFAULT_PAPER_FIELDS);
                let response = client.get_author_papers(&args.id, &params).await?;
                self.emit(&response, || {
                    let papers: Vec<_> = response.data.iter().collect();
                    render::paper_list("papers", &papers, args.page.offset)
                })
            }
            Commands::Recommend(args) => {
                let params = RecommendationParams {
                    positive_paper_ids: args.positive.clone(),
                    negative_paper_ids: args.negative.clone(),
                    fields: Some(build_fields_param(&args.fields, DEFAULT_PAPER_FIELDS)),
                    limit: Some(args.limit),
                };
                let response = client.get_recommendations(&params).await?;
                self.emit(&response, || {
                    let papers: Vec<_> = response.recommended_papers.iter().collect();
                    render::paper_list("recommended papers", &papers, 0)
                })
            }
        }
    }

    fn emit<T, F>(&self, value: &T, human: F) -> Result<String, CliError>
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Human => Ok(human()),
        }
    }
}
