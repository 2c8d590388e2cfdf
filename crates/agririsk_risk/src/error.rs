//! Pipeline error types.

use agririsk_core::types::DataError;
use agririsk_optimiser::ModelError;
use thiserror::Error;

/// Failure of an end-to-end run.
///
/// Every stage error is fatal; the originating error is carried unchanged.
///
/// # Variants
///
/// - `Data`: Schema, type, denominator or configuration error from a data stage
/// - `Model`: Training or prediction failure
///
/// # Examples
///
/// ```
/// use agririsk_core::types::DataError;
/// use agririsk_risk::PipelineError;
///
/// let err: PipelineError = DataError::missing_column("Revenue").into();
/// assert_eq!(err.to_string(), "Missing required column: Revenue");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Data stage failure.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Model stage failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PipelineError {
    /// The underlying dataset error, if any, including one wrapped by a
    /// model error.
    pub fn data_error(&self) -> Option<&DataError> {
        match self {
            Self::Data(e) | Self::Model(ModelError::Data(e)) => Some(e),
            Self::Model(_) => None,
        }
    }
}
