//! Per-column standard scaling.

use serde::{Deserialize, Serialize};

use super::stats::{mean, std_dev};

/// Fitted per-column standardisation parameters.
///
/// `transform` maps `x` to `(x - mean) / scale`, where `scale` is the
/// population standard deviation of the fitted column, or 1 for a
/// zero-variance column.
///
/// # Examples
///
/// ```
/// use agririsk_core::math::StandardScaler;
///
/// let scaler = StandardScaler::fit(&[1.0, 2.0, 3.0]);
/// let z = scaler.transform(&[1.0, 2.0, 3.0]);
/// assert!(z[1].abs() < 1e-12);
/// let back = scaler.inverse_transform(&z);
/// assert!((back[2] - 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Fitted mean
    pub mean: f64,
    /// Fitted scale (never zero)
    pub scale: f64,
}

impl StandardScaler {
    /// Fit to a column.
    pub fn fit(values: &[f64]) -> Self {
        let mean = mean(values);
        let sd = std_dev(values, 0);
        let scale = if sd == 0.0 || sd.is_nan() { 1.0 } else { sd };
        Self { mean, scale }
    }

    /// Identity scaler.
    pub fn identity() -> Self {
        Self {
            mean: 0.0,
            scale: 1.0,
        }
    }

    /// Scale one value.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (x - self.mean) / self.scale
    }

    /// Scale a column.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.apply(x)).collect()
    }

    /// Undo `transform`.
    pub fn inverse_transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&z| z * self.scale + self.mean).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_population_std() {
        let s = StandardScaler::fit(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(s.mean, 5.0);
        assert_relative_eq!(s.scale, 2.0);
    }

    #[test]
    fn test_zero_variance_scale_is_one() {
        let s = StandardScaler::fit(&[3.0, 3.0]);
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.transform(&[3.0, 4.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_inverse_recovers_input() {
        let values = [10.0, -3.5, 7.25, 0.0];
        let s = StandardScaler::fit(&values);
        let back = s.inverse_transform(&s.transform(&values));
        for (a, b) in back.iter().zip(&values) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_identity() {
        let s = StandardScaler::identity();
        assert_eq!(s.apply(4.0), 4.0);
    }
}
