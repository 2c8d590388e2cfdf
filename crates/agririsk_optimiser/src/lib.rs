//! # agririsk_optimiser
//!
//! Ridge regression with cross-validated regularisation for AgriRisk.
//!
//! This crate sits between Models (L2) and Risk (L3) in the architecture,
//! fitting the predictive models whose outputs feed scenario projection.
//!
//! ## Architecture Position
//!
//! Layer 2.5. Depends on `agririsk_core` (L1) only.
//!
//! ## Modules
//!
//! - `ridge`: Centred ridge regression solved by Cholesky decomposition
//! - `pipeline`: Standardise-then-ridge pipeline
//! - `validation`: Seeded k-fold and train/test splits
//! - `metrics`: RMSE and R²
//! - `tuning`: Grid search over a fixed log-spaced alpha grid
//! - `trainer`: Dataset-level training with exclusion lists, and prediction
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Score grid candidates on a rayon pool. Scores are
//!   collected in grid order, so the selected alpha matches the sequential
//!   path exactly.
//!
//! ## Example
//!
//! ```rust
//! use agririsk_core::frame::{Column, Dataset};
//! use agririsk_optimiser::trainer::train_ridge_regression;
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
//! let data = Dataset::from_columns(vec![
//!     ("X", Column::from(x)),
//!     ("Y", Column::from(y)),
//! ]).unwrap();
//!
//! let result = train_ridge_regression(&data, "Y", &[], 37, 5).unwrap();
//! assert_eq!(result.features, vec!["X"]);
//! assert!(result.test_r2 > 0.99);
//! ```

#![deny(missing_docs)]

pub mod metrics;
pub mod pipeline;
pub mod ridge;
pub mod trainer;
pub mod tuning;
pub mod validation;

mod error;

pub use error::ModelError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::pipeline::RidgePipeline;
    pub use crate::trainer::{predict_column, train_ridge_regression, ModelResult};
    pub use crate::tuning::{alpha_grid, tune_ridge_alpha};
    pub use crate::validation::{train_test_split, KFold};
    pub use crate::ModelError;
}
