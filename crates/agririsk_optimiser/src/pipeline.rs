//! Standardise-then-ridge pipeline.

use agririsk_core::math::{Matrix, StandardScaler};

use crate::error::ModelError;
use crate::ridge::RidgeRegression;

/// Per-feature standard scaling followed by ridge regression.
///
/// Scalers are fitted on the training rows only and reused unchanged at
/// prediction time.
#[derive(Clone, Debug, PartialEq)]
pub struct RidgePipeline {
    scalers: Vec<StandardScaler>,
    model: RidgeRegression,
}

impl RidgePipeline {
    /// Fit scalers and the regression on `x`, `y`.
    pub fn fit(x: &Matrix, y: &[f64], alpha: f64) -> Result<Self, ModelError> {
        let scalers: Vec<StandardScaler> = (0..x.n_cols())
            .map(|j| StandardScaler::fit(&x.column(j)))
            .collect();
        let scaled = scale(x, &scalers);
        let model = RidgeRegression::fit(&scaled, y, alpha)?;
        Ok(Self { scalers, model })
    }

    /// Predict for every row of `x`.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        if x.n_cols() != self.scalers.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.scalers.len(),
                got: x.n_cols(),
            });
        }
        self.model.predict(&scale(x, &self.scalers))
    }

    /// Regularisation strength.
    pub fn alpha(&self) -> f64 {
        self.model.alpha()
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.scalers.len()
    }

    /// Fitted per-feature scalers.
    pub fn scalers(&self) -> &[StandardScaler] {
        &self.scalers
    }

    /// Fitted regression on the scaled features.
    pub fn model(&self) -> &RidgeRegression {
        &self.model
    }
}

fn scale(x: &Matrix, scalers: &[StandardScaler]) -> Matrix {
    let mut out = x.clone();
    out.map_columns(|j, v| scalers[j].apply(v));
    out
}
