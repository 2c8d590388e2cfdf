//! Present-state carbon indices: cost, profit after cost and risk score.

use agririsk_core::frame::Dataset;
use agririsk_core::schema::{
    scenario_column, ADJ_PROFIT_PREFIX, CARBON_COST_PREFIX, CARBON_RISK_PREFIX,
};
use agririsk_core::types::{DataError, ScenarioSet};

use super::indices::floored_cost;

/// Append `Carbon_Cost_<scenario>` = floored `proxy × price`.
pub fn add_carbon_cost_index(
    data: &Dataset,
    scenarios: &ScenarioSet,
    proxy_column: &str,
) -> Result<Dataset, DataError> {
    let proxy = data.numeric(proxy_column)?;
    let mut out = data.clone();
    for scenario in scenarios {
        out.insert_numeric(
            scenario_column(CARBON_COST_PREFIX, &scenario.name),
            floored_cost(proxy, scenario.carbon_price),
        )?;
    }
    Ok(out)
}

fn add_difference(
    data: &Dataset,
    scenarios: &ScenarioSet,
    profit_column: &str,
    out_prefix: &str,
    sign: f64,
) -> Result<Dataset, DataError> {
    let profit = data.numeric(profit_column)?;
    let mut out = data.clone();
    for scenario in scenarios {
        let cost = data.numeric(&scenario_column(CARBON_COST_PREFIX, &scenario.name))?;
        let values = profit
            .iter()
            .zip(cost)
            .map(|(p, c)| sign * (p - c))
            .collect();
        out.insert_numeric(scenario_column(out_prefix, &scenario.name), values)?;
    }
    Ok(out)
}

/// Append `Adj_Profit_<scenario>` = profit minus carbon cost.
///
/// # Errors
///
/// `MissingColumn` if the carbon cost columns have not been added.
pub fn add_adjusted_profit(
    data: &Dataset,
    scenarios: &ScenarioSet,
    profit_column: &str,
) -> Result<Dataset, DataError> {
    add_difference(data, scenarios, profit_column, ADJ_PROFIT_PREFIX, 1.0)
}

/// Append `Carbon_Risk_Score_<scenario>` = carbon cost minus profit.
pub fn add_carbon_risk_score(
    data: &Dataset,
    scenarios: &ScenarioSet,
    profit_column: &str,
) -> Result<Dataset, DataError> {
    add_difference(data, scenarios, profit_column, CARBON_RISK_PREFIX, -1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agririsk_core::frame::Column;
    use agririsk_core::types::CarbonScenario;

    #[test]
    fn test_present_state_indices() {
        let data = Dataset::from_columns(vec![
            ("Proxy", Column::from(vec![0.5, -0.5])),
            ("Profit", Column::from(vec![3.0, 1.0])),
        ])
        .unwrap();
        let scenarios = ScenarioSet::new(vec![CarbonScenario::new("S", 2.0)]);

        let out = add_carbon_cost_index(&data, &scenarios, "Proxy").unwrap();
        assert_eq!(out.numeric("Carbon_Cost_S").unwrap(), &[2.0, 0.0]);

        let out = add_adjusted_profit(&out, &scenarios, "Profit").unwrap();
        assert_eq!(out.numeric("Adj_Profit_S").unwrap(), &[1.0, 1.0]);

        let out = add_carbon_risk_score(&out, &scenarios, "Profit").unwrap();
        assert_eq!(out.numeric("Carbon_Risk_Score_S").unwrap(), &[-1.0, -1.0]);
    }

    #[test]
    fn test_adjusted_profit_requires_costs() {
        let data = Dataset::from_columns(vec![("Profit", Column::from(vec![1.0]))]).unwrap();
        let scenarios = ScenarioSet::new(vec![CarbonScenario::new("S", 2.0)]);
        assert!(add_adjusted_profit(&data, &scenarios, "Profit").is_err());
    }
}
