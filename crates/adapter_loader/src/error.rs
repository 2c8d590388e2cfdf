//! Loader error types.

use std::path::PathBuf;

use agririsk_core::types::DataError;
use thiserror::Error;

/// File ingest and export failures.
///
/// # Variants
///
/// - `Io`: The file or its parent directory could not be opened or created
/// - `Csv`: Malformed delimited content or a serialisation failure
/// - `DuplicateHeader`: Two columns share a name
/// - `Data`: The parsed columns do not form a valid dataset
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Filesystem failure.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Delimited-format failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Repeated column name in the header row.
    #[error("Duplicate column header: {0}")]
    DuplicateHeader(String),

    /// Dataset construction failure.
    #[error(transparent)]
    Data(#[from] DataError),
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
