//! Model-training error types.

use agririsk_core::types::DataError;
use thiserror::Error;

/// Errors raised while fitting, validating or applying a ridge model.
///
/// # Variants
///
/// - `Data`: Wrapped dataset error (missing column, type mismatch)
/// - `InsufficientData`: Too few rows for the requested folds or split
/// - `InvalidParameter`: Invalid fold count, alpha or test fraction
/// - `SingularSystem`: The regularised normal equations are not positive definite
/// - `FeatureMismatch`: Prediction input has a different feature count
/// - `NoFiniteScore`: Every candidate produced a non-finite CV score
///
/// # Examples
///
/// ```
/// use agririsk_optimiser::ModelError;
///
/// let err = ModelError::InsufficientData { required: 5, provided: 3 };
/// assert!(err.to_string().contains("need at least 5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Wrapped dataset error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Not enough rows.
    #[error("Insufficient data: need at least {required} rows, got {provided}")]
    InsufficientData {
        /// Minimum number of rows
        required: usize,
        /// Rows available
        provided: usize,
    },

    /// Invalid training parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Normal equations could not be solved.
    #[error("Ridge system is not positive definite (alpha = {alpha})")]
    SingularSystem {
        /// Regularisation strength used
        alpha: f64,
    },

    /// Prediction input shape differs from the fitted model.
    #[error("Feature count mismatch: model expects {expected}, got {got}")]
    FeatureMismatch {
        /// Features seen at fit time
        expected: usize,
        /// Features supplied
        got: usize,
    },

    /// No candidate produced a finite score.
    #[error("No regularisation candidate produced a finite cross-validation score")]
    NoFiniteScore,
}

impl ModelError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_data_error() {
        let err: ModelError = DataError::missing_column("Net_Profit").into();
        assert_eq!(err.to_string(), "Missing required column: Net_Profit");
        assert!(matches!(err, ModelError::Data(DataError::MissingColumn { .. })));
    }

    #[test]
    fn test_display() {
        let err = ModelError::SingularSystem { alpha: 0.0 };
        assert!(err.to_string().contains("alpha = 0"));
        let err = ModelError::invalid_parameter("n_splits must be at least 2");
        assert!(err.to_string().starts_with("Invalid parameter"));
    }
}
