//! Carbon-price policy scenarios.
//!
//! A scenario is a named carbon price (USD per emissions-proxy unit) used to
//! convert an emissions proxy into a monetary cost index. The three preset
//! scenarios are the single canonical source of prices for the pipeline.

use serde::{Deserialize, Serialize};

use super::error::DataError;

/// Name of the mildest preset scenario.
pub const DELAYED_TRANSITION: &str = "Delayed Transition";
/// Name of the orderly net-zero preset scenario.
pub const NET_ZERO_2050: &str = "Net Zero 2050";
/// Name of the severe preset scenario used for stranding.
pub const DIVERGENT_NET_ZERO: &str = "Divergent Net Zero";

/// Preset carbon-price scenario types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetScenarioType {
    /// Late, abrupt policy response with a low near-term price
    DelayedTransition,
    /// Orderly transition reaching net zero by 2050
    NetZero2050,
    /// Net zero reached with divergent sector policies and the highest price
    DivergentNetZero,
}

impl PresetScenarioType {
    /// Get all presets in ascending price order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::DelayedTransition,
            Self::NetZero2050,
            Self::DivergentNetZero,
        ]
    }

    /// Get scenario name as used in column suffixes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DelayedTransition => DELAYED_TRANSITION,
            Self::NetZero2050 => NET_ZERO_2050,
            Self::DivergentNetZero => DIVERGENT_NET_ZERO,
        }
    }

    /// Get the carbon price in USD (2010) per unit.
    pub fn carbon_price(&self) -> f64 {
        match self {
            Self::DelayedTransition => 10.0,
            Self::NetZero2050 => 110.0,
            Self::DivergentNetZero => 300.0,
        }
    }

    /// Look up a preset by its column-suffix name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|preset| preset.name() == name)
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DelayedTransition => "Emissions keep rising until 2030, then policy tightens",
            Self::NetZero2050 => "Stringent policies limit warming to 1.5C through orderly transition",
            Self::DivergentNetZero => "Net zero by 2050 with higher costs from divergent policies",
        }
    }

    /// Convert to a priced scenario.
    pub fn to_scenario(&self) -> CarbonScenario {
        CarbonScenario::new(self.name(), self.carbon_price())
    }
}

/// A named carbon price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarbonScenario {
    /// Scenario name, used verbatim as a column-name suffix
    pub name: String,
    /// Carbon price multiplier
    pub carbon_price: f64,
}

impl CarbonScenario {
    /// Create a new scenario.
    pub fn new(name: impl Into<String>, carbon_price: f64) -> Self {
        Self {
            name: name.into(),
            carbon_price,
        }
    }
}

/// Ordered set of scenarios.
///
/// Iteration order is insertion order, which fixes the order in which
/// scenario-indexed columns are appended to a dataset.
///
/// # Examples
///
/// ```
/// use agririsk_core::types::ScenarioSet;
///
/// let set = ScenarioSet::standard();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.price("Net Zero 2050"), Some(110.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet {
    scenarios: Vec<CarbonScenario>,
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScenarioSet {
    /// Create a scenario set from explicit scenarios.
    pub fn new(scenarios: Vec<CarbonScenario>) -> Self {
        Self { scenarios }
    }

    /// The three preset scenarios in ascending price order.
    pub fn standard() -> Self {
        Self::new(
            PresetScenarioType::all()
                .iter()
                .map(PresetScenarioType::to_scenario)
                .collect(),
        )
    }

    /// Iterate over scenarios in order.
    pub fn iter(&self) -> impl Iterator<Item = &CarbonScenario> {
        self.scenarios.iter()
    }

    /// Scenario names in order.
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a scenario's price by name.
    pub fn price(&self, name: &str) -> Option<f64> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.carbon_price)
    }

    /// Returns true if a scenario with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.price(name).is_some()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true if the set holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Validate names and prices.
    ///
    /// Names must be non-empty and unique, prices finite.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.scenarios.is_empty() {
            return Err(DataError::invalid_configuration(
                "at least one carbon-price scenario is required",
            ));
        }
        for (i, scenario) in self.scenarios.iter().enumerate() {
            if scenario.name.trim().is_empty() {
                return Err(DataError::invalid_configuration(format!(
                    "scenario at position {} has an empty name",
                    i
                )));
            }
            if !scenario.carbon_price.is_finite() {
                return Err(DataError::invalid_configuration(format!(
                    "scenario '{}' has a non-finite carbon price",
                    scenario.name
                )));
            }
            if self.scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(DataError::invalid_configuration(format!(
                    "duplicate scenario name '{}'",
                    scenario.name
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a CarbonScenario;
    type IntoIter = std::slice::Iter<'a, CarbonScenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}
