//! Column-name contract for enterprise records.
//!
//! The raw input schema is fixed and known; every stage refers to columns
//! through these constants.

/// Enterprise identifier, dropped before modelling.
pub const ENTERPRISE_ID: &str = "Enterprise_ID";
/// Period revenue.
pub const REVENUE: &str = "Revenue";
/// Period operating expenses.
pub const EXPENSES: &str = "Expenses";
/// Period net profit.
pub const NET_PROFIT: &str = "Net_Profit";
/// Outstanding loan principal.
pub const LOAN_AMOUNT: &str = "Loan_Amount";
/// Average temperature over the period.
pub const AVG_TEMPERATURE: &str = "Avg_Temperature";
/// Drought severity index.
pub const DROUGHT_INDEX: &str = "Drought_Index";
/// Flood risk score.
pub const FLOOD_RISK_SCORE: &str = "Flood_Risk_Score";
/// Agricultural input cost index.
pub const INPUT_COST_INDEX: &str = "Input_Cost_Index";
/// Debt-to-equity ratio.
pub const DEBT_TO_EQUITY: &str = "Debt_to_Equity";
/// Financial risk level label; categorical even when integer coded.
pub const FINANCIAL_RISK_LEVEL: &str = "Financial_Risk_Level";
/// Region label.
pub const REGION: &str = "Region";
/// Enterprise size label.
pub const ENTERPRISE_SIZE: &str = "Enterprise_Size";
/// Fiscal quarter label.
pub const QUARTER: &str = "Quarter";

/// Net profit over revenue.
pub const PROFIT_MARGIN: &str = "Profit_Margin";
/// Expenses over revenue.
pub const COST_RATIO: &str = "Cost_Ratio";
/// Loan amount over revenue.
pub const DEBT_RATIO: &str = "Debt_Ratio";
/// Weighted drought / flood / temperature composite.
pub const CLIMATE_STRESS: &str = "Climate_Stress";
/// Tertile bucket of climate stress.
pub const CLIMATE_PROFILE: &str = "Climate_Profile";

/// Model prediction of net profit.
pub const PRED_NET_PROFIT: &str = "Pred_Net_Profit";
/// Model prediction of the baseline emissions proxy.
pub const PRED_EMISSIONS_PROXY: &str = "Pred_Emissions_Proxy";
/// Emissions proxy used for forward-looking scenario costs.
pub const FUTURE_EMISSIONS_PROXY: &str = "Future_Emissions_Proxy";
/// Revenue base for the projection.
pub const PRED_FUTURE_REVENUE: &str = "Pred_Future_Revenue";
/// Present value of the projected revenue path.
pub const DISCOUNTED_FUTURE_REVENUES: &str = "Discounted_Future_Revenues";
/// Stranded-asset flag.
pub const IS_STRANDED: &str = "Is_Stranded";

/// Prefix of present-state carbon cost columns.
pub const CARBON_COST_PREFIX: &str = "Carbon_Cost";
/// Prefix of profit-after-carbon-cost columns.
pub const ADJ_PROFIT_PREFIX: &str = "Adj_Profit";
/// Prefix of present-state carbon risk columns.
pub const CARBON_RISK_PREFIX: &str = "Carbon_Risk_Score";
/// Prefix of environmental risk columns.
pub const ENVIRONMENTAL_RISK_PREFIX: &str = "Environmental_Risk";
/// Prefix of projected carbon cost columns.
pub const CARBON_COST_FUTURE_PREFIX: &str = "Carbon_Cost_Future";
/// Prefix of projected profit columns.
pub const FUTURE_PROFIT_PREFIX: &str = "Future_Profit";
/// Prefix of projected carbon risk columns.
pub const CARBON_RISK_FUTURE_PREFIX: &str = "Carbon_Risk_Score_Future";

/// Columns that must be present and numeric for feature engineering.
pub const REQUIRED_RAW_COLUMNS: [&str; 7] = [
    REVENUE,
    EXPENSES,
    NET_PROFIT,
    LOAN_AMOUNT,
    AVG_TEMPERATURE,
    DROUGHT_INDEX,
    FLOOD_RISK_SCORE,
];

/// Categorical columns expanded by one-hot encoding.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [REGION, ENTERPRISE_SIZE, QUARTER];

/// Name of the k-th projected revenue column (1-based).
pub fn revenue_year_column(year: usize) -> String {
    format!("Revenue_Year_{}", year)
}

/// Name of a scenario-indexed column.
pub fn scenario_column(prefix: &str, scenario: &str) -> String {
    format!("{}_{}", prefix, scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_helpers() {
        assert_eq!(revenue_year_column(3), "Revenue_Year_3");
        assert_eq!(
            scenario_column("Carbon_Cost", "Net Zero 2050"),
            "Carbon_Cost_Net Zero 2050"
        );
    }
}
