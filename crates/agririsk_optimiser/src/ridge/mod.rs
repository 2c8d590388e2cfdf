//! L2-regularised linear regression.
//!
//! The intercept is not penalised: features and target are centred, the
//! system `(XᵀX + αI) w = Xᵀy` is solved on the centred data by Cholesky
//! decomposition, and the intercept is recovered as `ȳ − x̄·w`.

use agririsk_core::math::stats::mean;
use agririsk_core::math::{solve_cholesky, Matrix};
use agririsk_core::types::DataError;

use crate::error::ModelError;

/// Fitted ridge regression.
///
/// # Examples
///
/// ```
/// use agririsk_core::math::Matrix;
/// use agririsk_optimiser::ridge::RidgeRegression;
///
/// let x = Matrix::from_columns(&[vec![0.0, 1.0, 2.0, 3.0]]).unwrap();
/// let y = [1.0, 3.0, 5.0, 7.0];
/// let model = RidgeRegression::fit(&x, &y, 1e-9).unwrap();
/// assert!((model.coefficients()[0] - 2.0).abs() < 1e-6);
/// assert!((model.intercept() - 1.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeRegression {
    alpha: f64,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RidgeRegression {
    /// Fit to a design matrix and target.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a negative or non-finite alpha, or a target
    ///   whose length differs from the row count
    /// - `InsufficientData` for an empty design matrix
    /// - `NumericalInstability` for a NaN or infinite feature or target cell
    /// - `SingularSystem` if the regularised system is not positive definite
    pub fn fit(x: &Matrix, y: &[f64], alpha: f64) -> Result<Self, ModelError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ModelError::invalid_parameter(format!(
                "alpha must be finite and non-negative, got {}",
                alpha
            )));
        }
        if y.len() != x.n_rows() {
            return Err(ModelError::invalid_parameter(format!(
                "target has {} rows, design matrix has {}",
                y.len(),
                x.n_rows()
            )));
        }
        if x.n_rows() == 0 {
            return Err(ModelError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }
        check_finite(x, y)?;

        let x_mean = x.column_means();
        let y_mean = mean(y);
        let mut centred = x.clone();
        centred.map_columns(|j, v| v - x_mean[j]);
        let y_centred: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let mut gram = centred.gram();
        for (j, row) in gram.iter_mut().enumerate() {
            row[j] += alpha;
        }
        let rhs = centred.t_mul_vec(&y_centred);
        let coefficients =
            solve_cholesky(&gram, &rhs).ok_or(ModelError::SingularSystem { alpha })?;

        let intercept = y_mean
            - x_mean
                .iter()
                .zip(&coefficients)
                .map(|(m, w)| m * w)
                .sum::<f64>();

        Ok(Self {
            alpha,
            coefficients,
            intercept,
        })
    }

    /// Regularisation strength.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted coefficients, one per feature.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict for every row of `x`.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        if x.n_cols() != self.coefficients.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.coefficients.len(),
                got: x.n_cols(),
            });
        }
        Ok(x
            .mul_vec(&self.coefficients)
            .into_iter()
            .map(|v| v + self.intercept)
            .collect())
    }
}

/// First non-finite cell, features before target.
fn check_finite(x: &Matrix, y: &[f64]) -> Result<(), DataError> {
    for i in 0..x.n_rows() {
        if let Some(j) = x.row(i).iter().position(|v| !v.is_finite()) {
            return Err(DataError::non_finite(format!("feature {}", j), i));
        }
    }
    match y.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(DataError::non_finite("target", i)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn design() -> (Matrix, Vec<f64>) {
        let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x2 = vec![0.5, -1.0, 2.0, 0.0, 1.5, -0.5];
        let y = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 3.0 + 2.0 * a - 1.5 * b)
            .collect();
        (Matrix::from_columns(&[x1, x2]).unwrap(), y)
    }

    #[test]
    fn test_near_zero_alpha_recovers_ols() {
        let (x, y) = design();
        let model = RidgeRegression::fit(&x, &y, 1e-10).unwrap();
        assert_relative_eq!(model.coefficients()[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(model.coefficients()[1], -1.5, epsilon = 1e-6);
        assert_relative_eq!(model.intercept(), 3.0, epsilon = 1e-6);
        let pred = model.predict(&x).unwrap();
        for (p, t) in pred.iter().zip(&y) {
            assert_relative_eq!(p, t, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_alpha_shrinks_coefficients() {
        let (x, y) = design();
        let loose = RidgeRegression::fit(&x, &y, 0.01).unwrap();
        let tight = RidgeRegression::fit(&x, &y, 1000.0).unwrap();
        let norm = |m: &RidgeRegression| m.coefficients().iter().map(|w| w * w).sum::<f64>();
        assert!(norm(&tight) < norm(&loose));
    }

    #[test]
    fn test_intercept_not_penalised() {
        // A constant target is fitted exactly by the intercept at any alpha.
        let x = Matrix::from_columns(&[vec![1.0, 2.0, 3.0]]).unwrap();
        let model = RidgeRegression::fit(&x, &[5.0, 5.0, 5.0], 1e6).unwrap();
        assert_relative_eq!(model.intercept(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(model.coefficients()[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_without_regularisation() {
        // A constant column centres to zero, leaving a zero pivot at alpha = 0.
        let x = Matrix::from_columns(&[vec![2.0, 2.0, 2.0]]).unwrap();
        let err = RidgeRegression::fit(&x, &[1.0, 2.0, 3.0], 0.0).unwrap_err();
        assert!(matches!(err, ModelError::SingularSystem { .. }));
        // Any positive alpha makes the system solvable.
        assert!(RidgeRegression::fit(&x, &[1.0, 2.0, 3.0], 0.1).is_ok());
    }

    #[test]
    fn test_non_finite_input_is_not_singular() {
        let x = Matrix::from_columns(&[vec![1.0, 2.0, 3.0], vec![0.5, f64::NAN, 1.0]]).unwrap();
        let err = RidgeRegression::fit(&x, &[1.0, 2.0, 3.0], 1.0).unwrap_err();
        assert_eq!(err, ModelError::Data(DataError::non_finite("feature 1", 1)));

        let x = Matrix::from_columns(&[vec![1.0, 2.0, 3.0]]).unwrap();
        let err = RidgeRegression::fit(&x, &[1.0, f64::INFINITY, 3.0], 1.0).unwrap_err();
        assert_eq!(err, ModelError::Data(DataError::non_finite("target", 1)));
    }

    #[test]
    fn test_invalid_inputs() {
        let (x, y) = design();
        assert!(matches!(
            RidgeRegression::fit(&x, &y, -1.0),
            Err(ModelError::InvalidParameter(_))
        ));
        assert!(matches!(
            RidgeRegression::fit(&x, &y[..3], 1.0),
            Err(ModelError::InvalidParameter(_))
        ));
        let model = RidgeRegression::fit(&x, &y, 1.0).unwrap();
        let narrow = Matrix::from_columns(&[vec![1.0]]).unwrap();
        assert!(matches!(
            model.predict(&narrow),
            Err(ModelError::FeatureMismatch { expected: 2, got: 1 })
        ));
    }
}
