//! Emissions-proxy composites, their agreement table and baseline selection.
//!
//! A proxy is a weighted sum of four independently z-scored components:
//! a (log-scaled) size measure, the input-cost index, climate stress and
//! debt-to-equity. Four variants are built from the cross product of two
//! size measures and two weight vectors.

use agririsk_core::config::{BaselineStrategy, DEFAULT_BASELINE_PROXY};
use agririsk_core::frame::Dataset;
use agririsk_core::math::stats::{log1p_clipped, mean, quantile, zscore};
use agririsk_core::schema::{CLIMATE_STRESS, DEBT_TO_EQUITY, EXPENSES, INPUT_COST_INDEX, REVENUE};
use agririsk_core::types::DataError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Skewed weights: size, input cost, climate stress, debt.
pub const SKEWED_WEIGHTS: [f64; 4] = [0.4, 0.2, 0.3, 0.1];
/// Equal weights.
pub const EQUAL_WEIGHTS: [f64; 4] = [0.25, 0.25, 0.25, 0.25];
/// Names of the four proxy variants, in build order.
pub const PROXY_VARIANTS: [&str; 4] = [
    "Emissions_Proxy_v1",
    "Emissions_Proxy_v2",
    "Emissions_Proxy_v3",
    "Emissions_Proxy_v4",
];

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Parameters of one emissions-proxy composite.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxySpec {
    /// Size measure column
    pub scale_column: String,
    /// Input cost column
    pub input_cost_column: String,
    /// Climate stress column
    pub climate_stress_column: String,
    /// Leverage column
    pub debt_column: String,
    /// Component weights in the order size, input cost, climate, debt
    pub weights: [f64; 4],
    /// Apply `ln(1 + max(x, 0))` to the size measure before z-scoring
    pub use_log_scale: bool,
}

impl ProxySpec {
    /// Spec over the standard auxiliary columns with log scaling on.
    pub fn new(scale_column: impl Into<String>, weights: [f64; 4]) -> Self {
        Self {
            scale_column: scale_column.into(),
            input_cost_column: INPUT_COST_INDEX.to_string(),
            climate_stress_column: CLIMATE_STRESS.to_string(),
            debt_column: DEBT_TO_EQUITY.to_string(),
            weights,
            use_log_scale: true,
        }
    }

    /// Disable or enable log scaling of the size measure.
    pub fn with_log_scale(mut self, use_log_scale: bool) -> Self {
        self.use_log_scale = use_log_scale;
        self
    }

    /// Check that weights are finite and sum to one.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(DataError::invalid_configuration(
                "proxy weights must be finite",
            ));
        }
        let total: f64 = self.weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DataError::invalid_configuration(format!(
                "proxy weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// The four fixed variant specs, paired with their column names.
///
/// v1 = (Expenses, skewed), v2 = (Revenue, skewed),
/// v3 = (Expenses, equal), v4 = (Revenue, equal).
pub fn proxy_variant_specs() -> Vec<(&'static str, ProxySpec)> {
    let specs = [
        ProxySpec::new(EXPENSES, SKEWED_WEIGHTS),
        ProxySpec::new(REVENUE, SKEWED_WEIGHTS),
        ProxySpec::new(EXPENSES, EQUAL_WEIGHTS),
        ProxySpec::new(REVENUE, EQUAL_WEIGHTS),
    ];
    PROXY_VARIANTS.into_iter().zip(specs).collect()
}

/// Compute one proxy composite.
///
/// # Errors
///
/// - `InvalidConfiguration` for bad weights
/// - `MissingColumn` / `TypeMismatch` for absent or non-numeric inputs
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
/// use agririsk_models::proxies::{build_emissions_proxy, ProxySpec, EQUAL_WEIGHTS};
///
/// let data = Dataset::from_columns(vec![
///     ("Expenses", Column::from(vec![10.0, 20.0, 30.0])),
///     ("Input_Cost_Index", Column::from(vec![1.0, 2.0, 3.0])),
///     ("Climate_Stress", Column::from(vec![1.0, 2.0, 3.0])),
///     ("Debt_to_Equity", Column::from(vec![1.0, 2.0, 3.0])),
/// ]).unwrap();
///
/// let spec = ProxySpec::new("Expenses", EQUAL_WEIGHTS).with_log_scale(false);
/// let proxy = build_emissions_proxy(&data, &spec).unwrap();
/// assert!(proxy[1].abs() < 1e-9);
/// ```
pub fn build_emissions_proxy(data: &Dataset, spec: &ProxySpec) -> Result<Vec<f64>, DataError> {
    spec.validate()?;
    let scale = data.numeric(&spec.scale_column)?;
    let scale = if spec.use_log_scale {
        log1p_clipped(scale)
    } else {
        scale.to_vec()
    };
    let components = [
        zscore(&scale),
        zscore(data.numeric(&spec.input_cost_column)?),
        zscore(data.numeric(&spec.climate_stress_column)?),
        zscore(data.numeric(&spec.debt_column)?),
    ];

    Ok((0..data.n_rows())
        .map(|row| {
            spec.weights
                .iter()
                .zip(&components)
                .map(|(w, c)| w * c[row])
                .sum()
        })
        .collect())
}

/// Append the four proxy variants `Emissions_Proxy_v1..v4`.
pub fn add_proxy_variants(data: &Dataset) -> Result<Dataset, DataError> {
    let mut out = data.clone();
    for (name, spec) in proxy_variant_specs() {
        let proxy = build_emissions_proxy(data, &spec)?;
        out.insert_numeric(name, proxy)?;
    }
    info!(variants = PROXY_VARIANTS.len(), "Built emissions proxy variants");
    Ok(out)
}

/// Mean absolute difference between two columns.
pub fn mean_absolute_difference(a: &[f64], b: &[f64]) -> f64 {
    let diffs: Vec<f64> = a.iter().zip(b).map(|(x, y)| (y - x).abs()).collect();
    mean(&diffs)
}

/// Share of `a`'s top-quantile rows that are also in `b`'s top-quantile rows.
///
/// A row is in the top set when its value is at least the `q` quantile.
/// The denominator is the size of `a`'s top set, floored at one.
pub fn top_overlap(a: &[f64], b: &[f64], q: f64) -> f64 {
    let threshold_a = quantile(a, q);
    let threshold_b = quantile(b, q);
    let mut top_a = 0usize;
    let mut both = 0usize;
    for (x, y) in a.iter().zip(b) {
        if *x >= threshold_a {
            top_a += 1;
            if *y >= threshold_b {
                both += 1;
            }
        }
    }
    both as f64 / top_a.max(1) as f64
}

/// One row of the proxy agreement table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProxyComparison {
    /// First proxy of the pair
    pub proxy_a: String,
    /// Second proxy of the pair
    pub proxy_b: String,
    /// Mean absolute difference
    pub mad: f64,
    /// Top-quantile overlap of `proxy_a` within `proxy_b`
    pub top10_overlap: f64,
}

/// Compare every unordered pair of proxy variants.
///
/// Pairs are enumerated `i < j`, `i` ascending then `j` ascending, giving six
/// rows for four variants.
///
/// # Errors
///
/// `InvalidConfiguration` unless `0 < q < 1`; `MissingColumn` if a variant
/// is absent.
pub fn compare_proxies(data: &Dataset, q: f64) -> Result<Vec<ProxyComparison>, DataError> {
    if !(q > 0.0 && q < 1.0) {
        return Err(DataError::invalid_configuration(format!(
            "top quantile must lie in (0, 1), got {}",
            q
        )));
    }
    let mut rows = Vec::with_capacity(6);
    for (i, a) in PROXY_VARIANTS.iter().enumerate() {
        for b in &PROXY_VARIANTS[i + 1..] {
            let va = data.numeric(a)?;
            let vb = data.numeric(b)?;
            let row = ProxyComparison {
                proxy_a: a.to_string(),
                proxy_b: b.to_string(),
                mad: mean_absolute_difference(va, vb),
                top10_overlap: top_overlap(va, vb, q),
            };
            debug!(
                proxy_a = %row.proxy_a,
                proxy_b = %row.proxy_b,
                mad = row.mad,
                overlap = row.top10_overlap,
                "Compared proxy pair"
            );
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Policy choosing the baseline emissions proxy.
pub trait BaselineSelector {
    /// Pick a proxy column name.
    fn select(&self, data: &Dataset, comparisons: &[ProxyComparison]) -> String;
}

/// Fixed preference with fallback to `Emissions_Proxy_v1`.
#[derive(Clone, Debug, PartialEq)]
pub struct PreferredProxy {
    /// Preferred column name
    pub preferred: String,
}

impl PreferredProxy {
    /// Create a selector preferring `preferred`.
    pub fn new(preferred: impl Into<String>) -> Self {
        Self {
            preferred: preferred.into(),
        }
    }
}

impl Default for PreferredProxy {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_PROXY)
    }
}

impl BaselineSelector for PreferredProxy {
    fn select(&self, data: &Dataset, _comparisons: &[ProxyComparison]) -> String {
        choose_baseline_proxy(data, &self.preferred)
    }
}

/// Highest mean top-quantile overlap against the other variants.
///
/// Ties go to the earliest variant; an empty table falls back to
/// `Emissions_Proxy_v1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MostStableProxy;

impl BaselineSelector for MostStableProxy {
    fn select(&self, data: &Dataset, comparisons: &[ProxyComparison]) -> String {
        let mut best: Option<(&str, f64)> = None;
        for name in PROXY_VARIANTS.into_iter().filter(|n| data.has_column(n)) {
            let overlaps: Vec<f64> = comparisons
                .iter()
                .filter(|c| c.proxy_a == name || c.proxy_b == name)
                .map(|c| c.top10_overlap)
                .collect();
            if overlaps.is_empty() {
                continue;
            }
            let score = mean(&overlaps);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((name, score));
            }
        }
        match best {
            Some((name, score)) => {
                debug!(proxy = name, mean_overlap = score, "Most stable proxy");
                name.to_string()
            }
            None => {
                warn!("No proxy comparisons available, using default baseline");
                DEFAULT_BASELINE_PROXY.to_string()
            }
        }
    }
}

/// Selector for a configured strategy.
pub fn selector_for(strategy: BaselineStrategy, preferred: &str) -> Box<dyn BaselineSelector> {
    match strategy {
        BaselineStrategy::Preferred => Box::new(PreferredProxy::new(preferred)),
        BaselineStrategy::MostStable => Box::new(MostStableProxy),
    }
}

/// `preferred` if it names a column, else `Emissions_Proxy_v1`.
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
/// use agririsk_models::proxies::choose_baseline_proxy;
///
/// let data = Dataset::from_columns(vec![
///     ("Emissions_Proxy_v2", Column::from(vec![0.0])),
/// ]).unwrap();
/// assert_eq!(choose_baseline_proxy(&data, "Emissions_Proxy_v2"), "Emissions_Proxy_v2");
/// assert_eq!(choose_baseline_proxy(&data, "Other"), "Emissions_Proxy_v1");
/// ```
pub fn choose_baseline_proxy(data: &Dataset, preferred: &str) -> String {
    if data.has_column(preferred) {
        preferred.to_string()
    } else {
        warn!(
            preferred,
            fallback = DEFAULT_BASELINE_PROXY,
            "Preferred baseline proxy missing, falling back"
        );
        DEFAULT_BASELINE_PROXY.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agririsk_core::frame::Column;
    use approx::assert_relative_eq;

    fn proxy_inputs() -> Dataset {
        Dataset::from_columns(vec![
            (REVENUE, Column::from(vec![100.0, 250.0, 90.0, 400.0, 310.0])),
            (EXPENSES, Column::from(vec![-5.0, 120.0, 60.0, 300.0, 200.0])),
            (INPUT_COST_INDEX, Column::from(vec![1.1, 0.9, 1.3, 1.0, 1.2])),
            (CLIMATE_STRESS, Column::from(vec![0.2, 0.8, 0.5, 0.1, 0.9])),
            (DEBT_TO_EQUITY, Column::from(vec![1.5, 0.7, 2.1, 0.3, 1.0])),
        ])
        .unwrap()
    }

    #[test]
    fn test_variant_specs() {
        let specs = proxy_variant_specs();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].1.scale_column, EXPENSES);
        assert_eq!(specs[1].1.scale_column, REVENUE);
        assert_eq!(specs[2].1.weights, EQUAL_WEIGHTS);
        assert_eq!(specs[3].0, "Emissions_Proxy_v4");
        for (_, spec) in &specs {
            assert!(spec.validate().is_ok());
        }
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let spec = ProxySpec::new(REVENUE, [0.5, 0.5, 0.5, 0.5]);
        assert!(matches!(
            build_emissions_proxy(&proxy_inputs(), &spec),
            Err(DataError::InvalidConfiguration(_))
        ));
        let spec = ProxySpec::new(REVENUE, [f64::NAN, 0.5, 0.5, 0.0]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_proxy_is_weighted_zscores() {
        let data = proxy_inputs();
        let spec = ProxySpec::new(EXPENSES, SKEWED_WEIGHTS);
        let proxy = build_emissions_proxy(&data, &spec).unwrap();

        let scale = zscore(&log1p_clipped(data.numeric(EXPENSES).unwrap()));
        let input = zscore(data.numeric(INPUT_COST_INDEX).unwrap());
        let climate = zscore(data.numeric(CLIMATE_STRESS).unwrap());
        let debt = zscore(data.numeric(DEBT_TO_EQUITY).unwrap());
        for row in 0..5 {
            let expected =
                0.4 * scale[row] + 0.2 * input[row] + 0.3 * climate[row] + 0.1 * debt[row];
            assert_relative_eq!(proxy[row], expected, epsilon = 1e-12);
        }
        // Centred because every component is centred.
        assert!(mean(&proxy).abs() < 1e-9);
    }

    #[test]
    fn test_negative_scale_clipped_before_log() {
        let data = proxy_inputs();
        let logged = log1p_clipped(data.numeric(EXPENSES).unwrap());
        assert_eq!(logged[0], 0.0);
    }

    #[test]
    fn test_add_proxy_variants_appends_four_columns() {
        let data = proxy_inputs();
        let out = add_proxy_variants(&data).unwrap();
        assert_eq!(out.n_cols(), data.n_cols() + 4);
        for name in PROXY_VARIANTS {
            assert!(out.has_column(name));
        }
    }

    #[test]
    fn test_missing_auxiliary_column() {
        let mut data = proxy_inputs();
        data.remove_column(DEBT_TO_EQUITY);
        assert_eq!(
            add_proxy_variants(&data).unwrap_err(),
            DataError::missing_column(DEBT_TO_EQUITY)
        );
    }

    #[test]
    fn test_top_overlap() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(top_overlap(&a, &a, 0.8), 1.0);
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(top_overlap(&a, &b, 0.8), 0.0);
        // Ties at the threshold are all members.
        let flat = [1.0; 4];
        assert_eq!(top_overlap(&flat, &flat, 0.9), 1.0);
    }

    #[test]
    fn test_mean_absolute_difference() {
        assert_relative_eq!(
            mean_absolute_difference(&[0.0, 1.0, 2.0], &[1.0, 1.0, 0.0]),
            1.0
        );
    }

    #[test]
    fn test_compare_proxies_pair_order() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        let table = compare_proxies(&out, 0.9).unwrap();
        let pairs: Vec<(&str, &str)> = table
            .iter()
            .map(|r| (r.proxy_a.as_str(), r.proxy_b.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Emissions_Proxy_v1", "Emissions_Proxy_v2"),
                ("Emissions_Proxy_v1", "Emissions_Proxy_v3"),
                ("Emissions_Proxy_v1", "Emissions_Proxy_v4"),
                ("Emissions_Proxy_v2", "Emissions_Proxy_v3"),
                ("Emissions_Proxy_v2", "Emissions_Proxy_v4"),
                ("Emissions_Proxy_v3", "Emissions_Proxy_v4"),
            ]
        );
        for row in &table {
            assert!(row.mad >= 0.0);
            assert!((0.0..=1.0).contains(&row.top10_overlap));
        }
    }

    #[test]
    fn test_compare_proxies_rejects_bad_quantile() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        assert!(compare_proxies(&out, 1.0).is_err());
        assert!(compare_proxies(&out, 0.0).is_err());
    }

    #[test]
    fn test_choose_baseline_prefers_v1_regardless_of_table() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        assert_eq!(
            choose_baseline_proxy(&out, "Emissions_Proxy_v1"),
            "Emissions_Proxy_v1"
        );
        let selector = PreferredProxy::default();
        assert_eq!(selector.select(&out, &[]), "Emissions_Proxy_v1");
    }

    fn comparison(a: &str, b: &str, overlap: f64) -> ProxyComparison {
        ProxyComparison {
            proxy_a: a.to_string(),
            proxy_b: b.to_string(),
            mad: 0.0,
            top10_overlap: overlap,
        }
    }

    #[test]
    fn test_most_stable_selector() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        let [v1, v2, v3, v4] = PROXY_VARIANTS;
        let table = vec![
            comparison(v1, v2, 0.2),
            comparison(v1, v3, 0.2),
            comparison(v1, v4, 0.2),
            comparison(v2, v3, 1.0),
            comparison(v2, v4, 1.0),
            comparison(v3, v4, 0.5),
        ];
        // v2: (0.2 + 1 + 1) / 3 is the highest mean overlap.
        assert_eq!(MostStableProxy.select(&out, &table), v2);
        assert_eq!(MostStableProxy.select(&out, &[]), v1);
    }

    #[test]
    fn test_most_stable_ties_go_to_earliest() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        let [v1, v2, v3, v4] = PROXY_VARIANTS;
        let table: Vec<_> = [(v1, v2), (v1, v3), (v1, v4), (v2, v3), (v2, v4), (v3, v4)]
            .into_iter()
            .map(|(a, b)| comparison(a, b, 0.5))
            .collect();
        assert_eq!(MostStableProxy.select(&out, &table), v1);
    }

    #[test]
    fn test_selector_for_strategy() {
        let out = add_proxy_variants(&proxy_inputs()).unwrap();
        let preferred = selector_for(BaselineStrategy::Preferred, "Emissions_Proxy_v3");
        assert_eq!(preferred.select(&out, &[]), "Emissions_Proxy_v3");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_overlap_is_a_fraction(
                a in prop::collection::vec(-10.0..10.0f64, 1..40),
                q in 0.05..0.95f64,
            ) {
                let b: Vec<f64> = a.iter().rev().copied().collect();
                let overlap = top_overlap(&a, &b, q);
                prop_assert!((0.0..=1.0).contains(&overlap));
                prop_assert_eq!(top_overlap(&a, &a, q), 1.0);
            }
        }
    }
}
