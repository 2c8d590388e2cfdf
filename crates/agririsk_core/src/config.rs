//! Canonical pipeline configuration.
//!
//! One `PipelineConfig` value carries every tunable of a run (scenario
//! prices, projection horizon, rates, seed, fold count, quantile) and is
//! passed by reference into each stage.

use serde::{Deserialize, Serialize};

use crate::types::{DataError, ScenarioSet, DIVERGENT_NET_ZERO};

/// Default random seed.
pub const DEFAULT_RANDOM_SEED: u64 = 37;
/// Default cross-validation fold count.
pub const DEFAULT_CV_FOLDS: usize = 5;
/// Default projection horizon in years.
pub const DEFAULT_YEARS: usize = 5;
/// Default annual revenue growth rate.
pub const DEFAULT_GROWTH_RATE: f64 = 0.02;
/// Default annual discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.05;
/// Default top-risk quantile for proxy comparisons.
pub const DEFAULT_TOP_RISK_QUANTILE: f64 = 0.90;
/// Default preferred baseline proxy.
pub const DEFAULT_BASELINE_PROXY: &str = "Emissions_Proxy_v1";

/// How the baseline emissions proxy is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStrategy {
    /// The preferred proxy if present, else the default proxy
    #[default]
    Preferred,
    /// The proxy with the highest mean top-quantile overlap
    MostStable,
}

impl BaselineStrategy {
    /// Configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::MostStable => "most_stable",
        }
    }
}

impl std::str::FromStr for BaselineStrategy {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "preferred" => Ok(Self::Preferred),
            "most_stable" => Ok(Self::MostStable),
            _ => Err(DataError::invalid_configuration(format!(
                "unknown baseline strategy '{}', expected preferred or most_stable",
                s
            ))),
        }
    }
}

impl std::fmt::Display for BaselineStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline parameters.
///
/// Missing fields take their defaults when deserialised, so a TOML file
/// only needs to name the values it changes.
///
/// # Examples
///
/// ```
/// use agririsk_core::config::PipelineConfig;
///
/// let config = PipelineConfig::default().with_years(3).with_growth_rate(0.0);
/// assert_eq!(config.years, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for fold shuffling and the train/test split
    pub random_seed: u64,
    /// Cross-validation fold count
    pub cv_folds: usize,
    /// Projection horizon in years
    pub years: usize,
    /// Annual revenue growth rate
    pub growth_rate: f64,
    /// Annual discount rate
    pub discount_rate: f64,
    /// Quantile defining the top-risk set in proxy comparisons
    pub top_risk_quantile: f64,
    /// Carbon-price scenarios
    pub scenarios: ScenarioSet,
    /// Scenario whose future carbon risk drives the stranding flag
    pub severe_scenario: String,
    /// Preferred baseline emissions proxy
    pub baseline_proxy: String,
    /// Baseline selection strategy
    pub baseline_strategy: BaselineStrategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            random_seed: DEFAULT_RANDOM_SEED,
            cv_folds: DEFAULT_CV_FOLDS,
            years: DEFAULT_YEARS,
            growth_rate: DEFAULT_GROWTH_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            top_risk_quantile: DEFAULT_TOP_RISK_QUANTILE,
            scenarios: ScenarioSet::standard(),
            severe_scenario: DIVERGENT_NET_ZERO.to_string(),
            baseline_proxy: DEFAULT_BASELINE_PROXY.to_string(),
            baseline_strategy: BaselineStrategy::Preferred,
        }
    }
}

impl PipelineConfig {
    /// Configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the fold count.
    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    /// Set the projection horizon.
    pub fn with_years(mut self, years: usize) -> Self {
        self.years = years;
        self
    }

    /// Set the growth rate.
    pub fn with_growth_rate(mut self, rate: f64) -> Self {
        self.growth_rate = rate;
        self
    }

    /// Set the discount rate.
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Set the top-risk quantile.
    pub fn with_top_risk_quantile(mut self, q: f64) -> Self {
        self.top_risk_quantile = q;
        self
    }

    /// Replace the scenario set.
    pub fn with_scenarios(mut self, scenarios: ScenarioSet) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Set the severe scenario.
    pub fn with_severe_scenario(mut self, name: impl Into<String>) -> Self {
        self.severe_scenario = name.into();
        self
    }

    /// Set the baseline strategy.
    pub fn with_baseline_strategy(mut self, strategy: BaselineStrategy) -> Self {
        self.baseline_strategy = strategy;
        self
    }

    /// Validate every parameter.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.cv_folds < 2 {
            return Err(DataError::invalid_configuration(format!(
                "cv_folds must be at least 2, got {}",
                self.cv_folds
            )));
        }
        if self.years < 1 {
            return Err(DataError::invalid_configuration("years must be at least 1"));
        }
        if !(self.top_risk_quantile > 0.0 && self.top_risk_quantile < 1.0) {
            return Err(DataError::invalid_configuration(format!(
                "top_risk_quantile must lie in (0, 1), got {}",
                self.top_risk_quantile
            )));
        }
        for (name, rate) in [
            ("growth_rate", self.growth_rate),
            ("discount_rate", self.discount_rate),
        ] {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(DataError::invalid_configuration(format!(
                    "{} must be finite and greater than -1, got {}",
                    name, rate
                )));
            }
        }
        self.scenarios.validate()?;
        if !self.scenarios.contains(&self.severe_scenario) {
            return Err(DataError::invalid_configuration(format!(
                "severe scenario '{}' is not in the scenario set",
                self.severe_scenario
            )));
        }
        if self.baseline_proxy.trim().is_empty() {
            return Err(DataError::invalid_configuration(
                "baseline_proxy must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CarbonScenario;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.random_seed, 37);
        assert_eq!(config.cv_folds, 5);
        assert_eq!(config.years, 5);
        assert_eq!(config.growth_rate, 0.02);
        assert_eq!(config.discount_rate, 0.05);
        assert_eq!(config.top_risk_quantile, 0.90);
        assert_eq!(config.severe_scenario, "Divergent Net Zero");
        assert_eq!(config.baseline_proxy, "Emissions_Proxy_v1");
        assert_eq!(config.baseline_strategy, BaselineStrategy::Preferred);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_folds() {
        let err = PipelineConfig::default().with_cv_folds(1).validate().unwrap_err();
        assert!(err.to_string().contains("cv_folds"));
    }

    #[test]
    fn test_validate_quantile_bounds() {
        assert!(PipelineConfig::default()
            .with_top_risk_quantile(1.0)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_top_risk_quantile(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(PipelineConfig::default()
            .with_discount_rate(-1.0)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_growth_rate(f64::NAN)
            .validate()
            .is_err());
        assert!(PipelineConfig::default().with_years(0).validate().is_err());
    }

    #[test]
    fn test_validate_severe_scenario_membership() {
        let config = PipelineConfig::default()
            .with_scenarios(ScenarioSet::new(vec![CarbonScenario::new("Low", 5.0)]));
        assert!(config.validate().is_err());
        assert!(config.with_severe_scenario("Low").validate().is_ok());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "most-stable".parse::<BaselineStrategy>().unwrap(),
            BaselineStrategy::MostStable
        );
        assert_eq!(
            "Preferred".parse::<BaselineStrategy>().unwrap(),
            BaselineStrategy::Preferred
        );
        assert!("random".parse::<BaselineStrategy>().is_err());
        assert_eq!(BaselineStrategy::MostStable.to_string(), "most_stable");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            years = 3
            baseline_strategy = "most_stable"

            [[scenarios]]
            name = "Divergent Net Zero"
            carbon_price = 250.0
            "#,
        )
        .unwrap();
        assert_eq!(config.years, 3);
        assert_eq!(config.cv_folds, 5);
        assert_eq!(config.baseline_strategy, BaselineStrategy::MostStable);
        assert_eq!(config.scenarios.price("Divergent Net Zero"), Some(250.0));
        assert!(config.validate().is_ok());
    }
}
