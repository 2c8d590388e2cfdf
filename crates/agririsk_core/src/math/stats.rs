//! Descriptive statistics over column slices.
//!
//! Conventions follow the usual dataframe semantics:
//! - every reduction skips NaN cells
//! - elementwise transforms leave NaN cells as NaN
//! - standard deviations take an explicit `ddof` (0 = population, 1 = sample)

/// Guard added to standard deviations before dividing.
pub const STD_EPSILON: f64 = 1e-9;

fn present(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|x| !x.is_nan())
}

/// Number of non-NaN values.
pub fn count(values: &[f64]) -> usize {
    present(values).count()
}

/// Arithmetic mean of the non-NaN values. NaN if there are none.
pub fn mean(values: &[f64]) -> f64 {
    let n = count(values);
    if n == 0 {
        return f64::NAN;
    }
    present(values).sum::<f64>() / n as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// Returns NaN when the non-NaN count is at most `ddof`.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let n = count(values);
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = present(values).map(|x| (x - m) * (x - m)).sum();
    (ss / (n - ddof) as f64).sqrt()
}

/// Standardise with `ddof` and the epsilon guard: `(x - mean) / (std + ε)`.
///
/// A constant column maps to all zeros instead of dividing by zero.
pub fn standardize(values: &[f64], ddof: usize) -> Vec<f64> {
    let m = mean(values);
    let s = std_dev(values, ddof) + STD_EPSILON;
    values.iter().map(|x| (x - m) / s).collect()
}

/// Population z-score, `(x - mean) / (std₀ + ε)`.
///
/// # Examples
///
/// ```
/// use agririsk_core::math::stats::zscore;
///
/// let z = zscore(&[1.0, 2.0, 3.0]);
/// assert!(z[1].abs() < 1e-12);
/// assert!((z[2] - 1.224744871).abs() < 1e-6);
/// ```
pub fn zscore(values: &[f64]) -> Vec<f64> {
    standardize(values, 0)
}

/// Minimum ignoring NaN. NaN if no finite value exists.
pub fn min_value(values: &[f64]) -> f64 {
    present(values).fold(f64::NAN, |acc, x| if acc.is_nan() || x < acc { x } else { acc })
}

/// Maximum ignoring NaN. NaN if no finite value exists.
pub fn max_value(values: &[f64]) -> f64 {
    present(values).fold(f64::NAN, |acc, x| if acc.is_nan() || x > acc { x } else { acc })
}

/// Shift values so that their minimum is exactly zero.
///
/// The row holding the minimum becomes `min - min`, which is exactly 0.0.
pub fn shift_to_zero_min(values: &[f64]) -> Vec<f64> {
    let floor = min_value(values);
    values.iter().map(|x| x - floor).collect()
}

/// Quantile with linear interpolation between order statistics.
///
/// NaN values are skipped; an all-NaN or empty slice yields NaN.
///
/// # Examples
///
/// ```
/// use agririsk_core::math::stats::quantile;
///
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&v, 0.5), 2.5);
/// assert_eq!(quantile(&v, 0.0), 1.0);
/// assert_eq!(quantile(&v, 1.0), 4.0);
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = present(values).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    (sorted[lo] + (sorted[hi] - sorted[lo]) * frac).clamp(sorted[lo], sorted[hi])
}

/// `ln(1 + max(x, 0))` elementwise; negative values are floored, not rejected.
///
/// Missing (NaN) cells stay missing.
pub fn log1p_clipped(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|x| if x.is_nan() { f64::NAN } else { x.max(0.0).ln_1p() })
        .collect()
}

/// `num` values evenly spaced on a log10 scale from `10^start` to `10^stop`.
pub fn logspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| 10f64.powf(start + step * i as f64))
                .collect()
        }
    }
}
