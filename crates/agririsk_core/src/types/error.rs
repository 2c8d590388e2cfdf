//! Error types for structured error handling.
//!
//! This module provides:
//! - `DataError`: Errors from dataset access, derived-column arithmetic and
//!   configuration validation
//! - `ColumnKind`: The storage kind reported in type mismatch errors

use std::fmt;
use thiserror::Error;

/// Storage kind of a dataset column.
///
/// Used both for dispatching on [`Column`](crate::frame::Column) contents and
/// for describing type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// 64-bit floating point values (NaN marks a missing cell)
    Numeric,
    /// Boolean indicator values
    Boolean,
    /// Free-form category labels (empty string marks a missing cell)
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Categorised dataset errors.
///
/// Every stage of the pipeline reports failures through this type. All
/// variants are fatal: the pipeline never retries or continues with partial
/// results.
///
/// # Variants
/// - `MissingColumn`: A required column is absent (schema error)
/// - `TypeMismatch`: A column holds a different kind of data than required
/// - `LengthMismatch`: A column does not match the dataset row count
/// - `DegenerateDenominator`: A ratio denominator contains a zero
/// - `EmptyDataset`: An operation requires at least one row
/// - `InvalidConfiguration`: Invalid scenario, weight, quantile or fold parameters
/// - `NumericalInstability`: Non-finite values reached a numerical solver
///
/// # Examples
/// ```
/// use agririsk_core::types::DataError;
///
/// let err = DataError::missing_column("Revenue");
/// assert_eq!(format!("{}", err), "Missing required column: Revenue");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// A required column is absent from the dataset.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the absent column
        column: String,
    },

    /// A column holds data of an unexpected kind.
    #[error("Column '{column}' is {found}, expected {expected}")]
    TypeMismatch {
        /// Name of the offending column
        column: String,
        /// Kind required by the operation
        expected: ColumnKind,
        /// Kind actually stored
        found: ColumnKind,
    },

    /// A column length differs from the dataset row count.
    #[error("Column '{column}' has {got} rows, dataset has {expected}")]
    LengthMismatch {
        /// Name of the offending column
        column: String,
        /// Dataset row count
        expected: usize,
        /// Column length
        got: usize,
    },

    /// A denominator column contains a zero value.
    #[error("Denominator column '{column}' is zero at row {row}")]
    DegenerateDenominator {
        /// Name of the denominator column
        column: String,
        /// First row holding a zero
        row: usize,
    },

    /// The operation requires a non-empty dataset.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Invalid pipeline parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Non-finite input to a linear-algebra step.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl DataError {
    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(column: impl Into<String>, expected: ColumnKind, found: ColumnKind) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            found,
        }
    }

    /// Create a degenerate denominator error.
    pub fn degenerate_denominator(column: impl Into<String>, row: usize) -> Self {
        Self::DegenerateDenominator {
            column: column.into(),
            row,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create a numerical instability error for a NaN or infinite cell.
    pub fn non_finite(column: impl AsRef<str>, row: usize) -> Self {
        Self::NumericalInstability(format!(
            "non-finite value in column '{}' at row {}",
            column.as_ref(),
            row
        ))
    }

    /// Returns true for schema-level failures (absent columns).
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = DataError::missing_column("Expenses");
        assert_eq!(err.to_string(), "Missing required column: Expenses");
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = DataError::type_mismatch("Region", ColumnKind::Numeric, ColumnKind::Categorical);
        assert_eq!(
            err.to_string(),
            "Column 'Region' is categorical, expected numeric"
        );
        assert!(!err.is_schema_error());
    }

    #[test]
    fn test_degenerate_denominator_display() {
        let err = DataError::degenerate_denominator("Revenue", 3);
        assert!(err.to_string().contains("Revenue"));
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_empty_and_non_finite_display() {
        assert_eq!(DataError::EmptyDataset.to_string(), "Dataset is empty");
        let err = DataError::non_finite("Expenses", 7);
        assert_eq!(
            err.to_string(),
            "Numerical instability: non-finite value in column 'Expenses' at row 7"
        );
        assert!(!err.is_schema_error());
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = DataError::invalid_configuration("cv_folds must be >= 2");
        assert_eq!(err.to_string(), "Invalid configuration: cv_folds must be >= 2");
    }
}
