//! Grid search over the ridge regularisation strength.
//!
//! Every candidate is scored by the mean negative RMSE across the same
//! k folds. The highest mean score wins; exact ties keep the candidate
//! that comes first in ascending grid order.

use agririsk_core::math::stats::{logspace, mean};
use agririsk_core::math::Matrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::metrics::rmse;
use crate::pipeline::RidgePipeline;
use crate::validation::{Fold, KFold};

/// Number of grid candidates.
pub const ALPHA_GRID_SIZE: usize = 20;
/// log10 of the smallest candidate.
pub const ALPHA_GRID_MIN_EXP: f64 = -3.0;
/// log10 of the largest candidate.
pub const ALPHA_GRID_MAX_EXP: f64 = 3.0;

/// The fixed candidate grid: 20 log-spaced values from 1e-3 to 1e3.
pub fn alpha_grid() -> Vec<f64> {
    logspace(ALPHA_GRID_MIN_EXP, ALPHA_GRID_MAX_EXP, ALPHA_GRID_SIZE)
}

/// Cross-validation outcome for one candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CvScore {
    /// Regularisation strength
    pub alpha: f64,
    /// Negative RMSE per fold
    pub fold_scores: Vec<f64>,
    /// Mean of `fold_scores`
    pub mean_score: f64,
}

/// Outcome of a full grid search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSearchResult {
    /// Selected regularisation strength
    pub best_alpha: f64,
    /// Mean score of the selected candidate
    pub best_score: f64,
    /// Every candidate in grid order
    pub scores: Vec<CvScore>,
}

/// Negative RMSE of a pipeline fitted on each fold's training rows.
pub fn cross_val_score(
    x: &Matrix,
    y: &[f64],
    alpha: f64,
    folds: &[Fold],
) -> Result<Vec<f64>, ModelError> {
    folds
        .iter()
        .map(|(train, test)| {
            let y_train: Vec<f64> = train.iter().map(|&i| y[i]).collect();
            let y_test: Vec<f64> = test.iter().map(|&i| y[i]).collect();
            let pipeline = RidgePipeline::fit(&x.select_rows(train), &y_train, alpha)?;
            let pred = pipeline.predict(&x.select_rows(test))?;
            Ok(-rmse(&y_test, &pred))
        })
        .collect()
}

fn score_candidate(
    x: &Matrix,
    y: &[f64],
    alpha: f64,
    folds: &[Fold],
) -> Result<CvScore, ModelError> {
    let fold_scores = cross_val_score(x, y, alpha, folds)?;
    let mean_score = mean(&fold_scores);
    debug!(alpha, mean_score, "Scored ridge candidate");
    Ok(CvScore {
        alpha,
        fold_scores,
        mean_score,
    })
}

#[cfg(feature = "parallel")]
fn score_all(
    x: &Matrix,
    y: &[f64],
    alphas: &[f64],
    folds: &[Fold],
) -> Result<Vec<CvScore>, ModelError> {
    use rayon::prelude::*;

    // Indexed collect keeps grid order regardless of scheduling.
    alphas
        .par_iter()
        .map(|&alpha| score_candidate(x, y, alpha, folds))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_all(
    x: &Matrix,
    y: &[f64],
    alphas: &[f64],
    folds: &[Fold],
) -> Result<Vec<CvScore>, ModelError> {
    alphas
        .iter()
        .map(|&alpha| score_candidate(x, y, alpha, folds))
        .collect()
}

/// Index of the best candidate: strictly greater mean score wins, so ties
/// keep the earliest. Non-finite scores never win.
pub fn select_best(scores: &[CvScore]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in scores.iter().enumerate() {
        if !s.mean_score.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, b)| s.mean_score > b) {
            best = Some((i, s.mean_score));
        }
    }
    best.map(|(i, _)| i)
}

/// Score every alpha on shared folds and pick the best.
///
/// # Errors
///
/// - `InvalidParameter` for an empty grid
/// - fold and fit errors from the candidates
/// - `NoFiniteScore` if no candidate scored finitely
pub fn grid_search(
    x: &Matrix,
    y: &[f64],
    alphas: &[f64],
    kfold: &KFold,
) -> Result<GridSearchResult, ModelError> {
    if alphas.is_empty() {
        return Err(ModelError::invalid_parameter("alpha grid is empty"));
    }
    let folds = kfold.split(x.n_rows())?;
    let scores = score_all(x, y, alphas, &folds)?;
    let best = select_best(&scores).ok_or(ModelError::NoFiniteScore)?;
    let result = GridSearchResult {
        best_alpha: scores[best].alpha,
        best_score: scores[best].mean_score,
        scores,
    };
    info!(
        best_alpha = result.best_alpha,
        best_score = result.best_score,
        candidates = alphas.len(),
        "Grid search complete"
    );
    Ok(result)
}

/// Select alpha from the fixed grid by seeded, shuffled k-fold CV.
///
/// Deterministic for identical seed and data.
pub fn tune_ridge_alpha(
    x: &Matrix,
    y: &[f64],
    seed: u64,
    cv_splits: usize,
) -> Result<f64, ModelError> {
    let kfold = KFold::new(cv_splits).with_shuffle(seed);
    grid_search(x, y, &alpha_grid(), &kfold).map(|r| r.best_alpha)
}
