//! Environmental and forward-looking scenario indices.

use agririsk_core::frame::Dataset;
use agririsk_core::math::stats::shift_to_zero_min;
use agririsk_core::schema::{
    scenario_column, CARBON_COST_FUTURE_PREFIX, CARBON_RISK_FUTURE_PREFIX,
    ENVIRONMENTAL_RISK_PREFIX, FUTURE_PROFIT_PREFIX,
};
use agririsk_core::types::{DataError, ScenarioSet};
use tracing::debug;

/// `proxy × price`, shifted so the minimum is exactly zero.
///
/// # Examples
///
/// ```
/// use agririsk_risk::scenarios::floored_cost;
///
/// assert_eq!(floored_cost(&[-1.0, 0.0, 1.0], 10.0), vec![0.0, 10.0, 20.0]);
/// ```
pub fn floored_cost(proxy: &[f64], price: f64) -> Vec<f64> {
    let raw: Vec<f64> = proxy.iter().map(|p| p * price).collect();
    shift_to_zero_min(&raw)
}

/// Append `Environmental_Risk_<scenario>` = floored `proxy × price`.
pub fn add_environmental_risk_index(
    data: &Dataset,
    scenarios: &ScenarioSet,
    proxy_column: &str,
) -> Result<Dataset, DataError> {
    let proxy = data.numeric(proxy_column)?;
    let mut out = data.clone();
    for scenario in scenarios {
        let column = scenario_column(ENVIRONMENTAL_RISK_PREFIX, &scenario.name);
        debug!(column = %column, price = scenario.carbon_price, "Environmental risk index");
        out.insert_numeric(column, floored_cost(proxy, scenario.carbon_price))?;
    }
    Ok(out)
}

/// Append `Carbon_Cost_Future_<scenario>` (floored `proxy × price`) and
/// `Future_Profit_<scenario>` (future revenue minus that cost).
pub fn add_future_profit_index(
    data: &Dataset,
    scenarios: &ScenarioSet,
    future_revenue_column: &str,
    proxy_column: &str,
) -> Result<Dataset, DataError> {
    let revenue = data.numeric(future_revenue_column)?;
    let proxy = data.numeric(proxy_column)?;
    let mut out = data.clone();
    for scenario in scenarios {
        let cost = floored_cost(proxy, scenario.carbon_price);
        let profit = revenue.iter().zip(&cost).map(|(r, c)| r - c).collect();
        out.insert_numeric(
            scenario_column(CARBON_COST_FUTURE_PREFIX, &scenario.name),
            cost,
        )?;
        out.insert_numeric(scenario_column(FUTURE_PROFIT_PREFIX, &scenario.name), profit)?;
    }
    Ok(out)
}

/// Append `Carbon_Risk_Score_Future_<scenario>` = future cost minus future
/// revenue, the exact negation of the future profit index.
///
/// # Errors
///
/// `MissingColumn` if the future cost columns have not been added.
pub fn add_future_carbon_risk_index(
    data: &Dataset,
    scenarios: &ScenarioSet,
    future_revenue_column: &str,
) -> Result<Dataset, DataError> {
    let revenue = data.numeric(future_revenue_column)?;
    let mut out = data.clone();
    for scenario in scenarios {
        let cost = data.numeric(&scenario_column(CARBON_COST_FUTURE_PREFIX, &scenario.name))?;
        let risk = cost.iter().zip(revenue).map(|(c, r)| c - r).collect();
        out.insert_numeric(
            scenario_column(CARBON_RISK_FUTURE_PREFIX, &scenario.name),
            risk,
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agririsk_core::frame::Column;
    use agririsk_core::math::stats::min_value;
    use agririsk_core::types::CarbonScenario;

    fn data() -> Dataset {
        Dataset::from_columns(vec![
            ("Proxy", Column::from(vec![-1.0, 0.0, 1.0])),
            ("Revenue", Column::from(vec![5.0, 15.0, 10.0])),
        ])
        .unwrap()
    }

    fn single(price: f64) -> ScenarioSet {
        ScenarioSet::new(vec![CarbonScenario::new("Test", price)])
    }

    #[test]
    fn test_environmental_risk_floor() {
        let out = add_environmental_risk_index(&data(), &single(10.0), "Proxy").unwrap();
        assert_eq!(
            out.numeric("Environmental_Risk_Test").unwrap(),
            &[0.0, 10.0, 20.0]
        );
    }

    #[test]
    fn test_every_standard_scenario_floors_at_zero() {
        let out =
            add_environmental_risk_index(&data(), &ScenarioSet::standard(), "Proxy").unwrap();
        for name in ScenarioSet::standard().names() {
            let column = scenario_column(ENVIRONMENTAL_RISK_PREFIX, name);
            assert_eq!(min_value(out.numeric(&column).unwrap()), 0.0);
        }
    }

    #[test]
    fn test_future_profit_and_risk_negate() {
        let scenarios = ScenarioSet::standard();
        let out = add_future_profit_index(&data(), &scenarios, "Revenue", "Proxy").unwrap();
        let out = add_future_carbon_risk_index(&out, &scenarios, "Revenue").unwrap();
        for name in scenarios.names() {
            let profit = out.numeric(&scenario_column(FUTURE_PROFIT_PREFIX, name)).unwrap();
            let risk = out
                .numeric(&scenario_column(CARBON_RISK_FUTURE_PREFIX, name))
                .unwrap();
            for (p, r) in profit.iter().zip(risk) {
                assert_eq!(p + r, 0.0);
            }
        }
    }

    #[test]
    fn test_future_cost_values() {
        let out = add_future_profit_index(&data(), &single(10.0), "Revenue", "Proxy").unwrap();
        assert_eq!(
            out.numeric("Carbon_Cost_Future_Test").unwrap(),
            &[0.0, 10.0, 20.0]
        );
        assert_eq!(
            out.numeric("Future_Profit_Test").unwrap(),
            &[5.0, 5.0, -10.0]
        );
    }

    #[test]
    fn test_risk_requires_costs() {
        let err = add_future_carbon_risk_index(&data(), &single(1.0), "Revenue").unwrap_err();
        assert_eq!(err, DataError::missing_column("Carbon_Cost_Future_Test"));
    }
}
