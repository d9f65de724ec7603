//! CLI command implementations

pub mod commands;
pub mod error;
pub mod render;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::CliError;
