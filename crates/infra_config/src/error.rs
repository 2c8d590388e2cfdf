//! Configuration error types.

use agririsk_core::types::DataError;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unreadable or unparsable config file.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable with an unparsable value.
    #[error("Environment variable {name} has invalid value '{value}'")]
    EnvError {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },

    /// Pipeline parameters rejected by validation.
    #[error(transparent)]
    Pipeline(#[from] DataError),
}
