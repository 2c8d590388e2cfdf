//! Leakage-controlled ridge training on a dataset.

use agririsk_core::frame::Dataset;
use agririsk_core::math::Matrix;
use agririsk_core::types::DataError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;
use crate::metrics::{r2_score, rmse};
use crate::pipeline::RidgePipeline;
use crate::tuning::tune_ridge_alpha;
use crate::validation::{train_test_split, DEFAULT_TEST_FRACTION};

/// A fitted model with its feature set and held-out metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelResult {
    /// Target column
    pub target: String,
    /// Fitted pipeline, reusable on rows with the same features
    pub pipeline: RidgePipeline,
    /// Feature columns in dataset order
    pub features: Vec<String>,
    /// Selected regularisation strength
    pub best_alpha: f64,
    /// Test-split RMSE
    pub test_rmse: f64,
    /// Test-split R²
    pub test_r2: f64,
}

/// Serialisable metrics of a [`ModelResult`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Target column
    pub target: String,
    /// Number of features
    pub n_features: usize,
    /// Selected regularisation strength
    pub best_alpha: f64,
    /// Test-split RMSE
    pub test_rmse: f64,
    /// Test-split R²
    pub test_r2: f64,
}

impl ModelResult {
    /// Metrics without the fitted pipeline.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            target: self.target.clone(),
            n_features: self.features.len(),
            best_alpha: self.best_alpha,
            test_rmse: self.test_rmse,
            test_r2: self.test_r2,
        }
    }

    /// Predict for a dataset carrying the same features.
    pub fn predict(&self, data: &Dataset) -> Result<Vec<f64>, ModelError> {
        self.pipeline.predict(&feature_matrix(data, &self.features)?)
    }
}

/// Every column except the target and the exclusions, in dataset order.
///
/// Exclusions that name absent columns are ignored.
pub fn select_features(data: &Dataset, target: &str, exclude: &[&str]) -> Vec<String> {
    data.column_names()
        .iter()
        .filter(|name| name.as_str() != target && !exclude.contains(&name.as_str()))
        .cloned()
        .collect()
}

/// Design matrix of the named features, booleans cast to 0/1.
///
/// # Errors
///
/// `MissingColumn` for an absent feature, `TypeMismatch` for a categorical
/// one, `NumericalInstability` for a NaN or infinite cell, `InvalidParameter`
/// for an empty feature list.
pub fn feature_matrix(data: &Dataset, features: &[String]) -> Result<Matrix, ModelError> {
    if features.is_empty() {
        return Err(ModelError::invalid_parameter("no feature columns selected"));
    }
    let columns = features
        .iter()
        .map(|name| {
            let values = data.feature_values(name)?;
            ensure_finite(name, &values)?;
            Ok(values)
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    Matrix::from_columns(&columns)
        .ok_or_else(|| ModelError::invalid_parameter("feature columns differ in length"))
}

fn ensure_finite(column: &str, values: &[f64]) -> Result<(), DataError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(DataError::non_finite(column, row)),
        None => Ok(()),
    }
}

/// Fit a ridge model for `target` using every other non-excluded column.
///
/// Alpha is chosen by seeded k-fold CV over the full data; the final
/// pipeline is refitted on a seeded 80% training split and scored on the
/// remaining rows.
///
/// # Errors
///
/// `MissingColumn` for an absent target, plus any error from feature
/// extraction, resampling or fitting.
pub fn train_ridge_regression(
    data: &Dataset,
    target: &str,
    exclude: &[&str],
    seed: u64,
    cv_splits: usize,
) -> Result<ModelResult, ModelError> {
    let y = data.numeric(target)?.to_vec();
    ensure_finite(target, &y)?;
    let features = select_features(data, target, exclude);
    let x = feature_matrix(data, &features)?;

    let best_alpha = tune_ridge_alpha(&x, &y, seed, cv_splits)?;

    let (train, test) = train_test_split(x.n_rows(), DEFAULT_TEST_FRACTION, seed)?;
    let y_train: Vec<f64> = train.iter().map(|&i| y[i]).collect();
    let y_test: Vec<f64> = test.iter().map(|&i| y[i]).collect();
    let pipeline = RidgePipeline::fit(&x.select_rows(&train), &y_train, best_alpha)?;
    let pred = pipeline.predict(&x.select_rows(&test))?;

    let result = ModelResult {
        target: target.to_string(),
        pipeline,
        features,
        best_alpha,
        test_rmse: rmse(&y_test, &pred),
        test_r2: r2_score(&y_test, &pred),
    };
    info!(
        column = target,
        features = result.features.len(),
        alpha = result.best_alpha,
        rmse = result.test_rmse,
        r2 = result.test_r2,
        "Trained ridge model"
    );
    Ok(result)
}

/// Append the predictions of a fitted pipeline as `out_column`.
///
/// # Errors
///
/// `MissingColumn` if any feature is absent from `data`.
pub fn predict_column(
    data: &Dataset,
    pipeline: &RidgePipeline,
    features: &[String],
    out_column: &str,
) -> Result<Dataset, ModelError> {
    let pred = pipeline.predict(&feature_matrix(data, features)?)?;
    let mut out = data.clone();
    out.insert_numeric(out_column, pred)?;
    Ok(out)
}
