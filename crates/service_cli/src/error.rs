//! CLI error types.

use adapter_loader::LoaderError;
use agririsk_core::types::DataError;
use agririsk_risk::PipelineError;
use infra_config::ConfigError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration could not be assembled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dataset read or write failure.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Stage failure inside the pipeline.
    #[error("Pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),

    /// Input does not satisfy the raw schema.
    #[error("Input validation failed: {0}")]
    Data(#[from] DataError),

    /// Report serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
