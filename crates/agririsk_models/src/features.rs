//! Financial ratios and the climate-stress composite.
//!
//! All functions are pure: they clone the input, append columns and return
//! the clone.

use agririsk_core::frame::Dataset;
use agririsk_core::math::stats::standardize;
use agririsk_core::schema::{
    AVG_TEMPERATURE, CLIMATE_STRESS, COST_RATIO, DEBT_RATIO, DROUGHT_INDEX, EXPENSES,
    FLOOD_RISK_SCORE, LOAN_AMOUNT, NET_PROFIT, PROFIT_MARGIN, REQUIRED_RAW_COLUMNS, REVENUE,
};
use agririsk_core::types::DataError;
use tracing::info;

/// Weight of the drought index in climate stress.
pub const DROUGHT_WEIGHT: f64 = 0.4;
/// Weight of the flood risk score in climate stress.
pub const FLOOD_WEIGHT: f64 = 0.4;
/// Weight of the standardised temperature in climate stress.
pub const TEMPERATURE_WEIGHT: f64 = 0.2;

/// Check that every required raw column is present.
///
/// # Errors
///
/// `MissingColumn` naming the first absent column, then `EmptyDataset` if
/// the header is complete but no rows follow.
pub fn validate_raw_schema(data: &Dataset) -> Result<(), DataError> {
    if let Some(column) = REQUIRED_RAW_COLUMNS.iter().find(|c| !data.has_column(c)) {
        return Err(DataError::missing_column(*column));
    }
    if data.is_empty() {
        return Err(DataError::EmptyDataset);
    }
    Ok(())
}

/// Elementwise `numerator / denominator`, failing on any zero denominator.
fn ratio(
    numerator: &[f64],
    denominator: &[f64],
    denominator_name: &str,
) -> Result<Vec<f64>, DataError> {
    if let Some(row) = denominator.iter().position(|&d| d == 0.0) {
        return Err(DataError::degenerate_denominator(denominator_name, row));
    }
    Ok(numerator
        .iter()
        .zip(denominator)
        .map(|(n, d)| n / d)
        .collect())
}

/// Append `Profit_Margin`, `Cost_Ratio` and `Debt_Ratio`, each over revenue.
///
/// # Errors
///
/// - `MissingColumn` / `TypeMismatch` for absent or non-numeric inputs
/// - `DegenerateDenominator` if any revenue is zero
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
/// use agririsk_models::features::add_financial_ratios;
///
/// let data = Dataset::from_columns(vec![
///     ("Revenue", Column::from(vec![100.0, 200.0])),
///     ("Expenses", Column::from(vec![80.0, 150.0])),
///     ("Net_Profit", Column::from(vec![20.0, 50.0])),
///     ("Loan_Amount", Column::from(vec![50.0, 100.0])),
/// ]).unwrap();
///
/// let out = add_financial_ratios(&data).unwrap();
/// assert_eq!(out.numeric("Profit_Margin").unwrap(), &[0.2, 0.25]);
/// assert_eq!(out.numeric("Debt_Ratio").unwrap(), &[0.5, 0.5]);
/// ```
pub fn add_financial_ratios(data: &Dataset) -> Result<Dataset, DataError> {
    let revenue = data.numeric(REVENUE)?;
    let profit_margin = ratio(data.numeric(NET_PROFIT)?, revenue, REVENUE)?;
    let cost_ratio = ratio(data.numeric(EXPENSES)?, revenue, REVENUE)?;
    let debt_ratio = ratio(data.numeric(LOAN_AMOUNT)?, revenue, REVENUE)?;

    let mut out = data.clone();
    out.insert_numeric(PROFIT_MARGIN, profit_margin)?;
    out.insert_numeric(COST_RATIO, cost_ratio)?;
    out.insert_numeric(DEBT_RATIO, debt_ratio)?;
    Ok(out)
}

/// Append `Climate_Stress`.
///
/// `0.4 · drought + 0.4 · flood + 0.2 · z(temperature)`, where the
/// temperature z-score uses the sample standard deviation plus ε.
pub fn add_climate_stress(data: &Dataset) -> Result<Dataset, DataError> {
    let drought = data.numeric(DROUGHT_INDEX)?;
    let flood = data.numeric(FLOOD_RISK_SCORE)?;
    let temp_z = standardize(data.numeric(AVG_TEMPERATURE)?, 1);

    let stress = drought
        .iter()
        .zip(flood)
        .zip(&temp_z)
        .map(|((d, f), t)| DROUGHT_WEIGHT * d + FLOOD_WEIGHT * f + TEMPERATURE_WEIGHT * t)
        .collect();

    let mut out = data.clone();
    out.insert_numeric(CLIMATE_STRESS, stress)?;
    Ok(out)
}

/// Validate the raw schema, then add ratios and climate stress.
pub fn engineer_features(data: &Dataset) -> Result<Dataset, DataError> {
    validate_raw_schema(data)?;
    let out = add_climate_stress(&add_financial_ratios(data)?)?;
    info!(
        rows = out.n_rows(),
        columns = out.n_cols(),
        "Engineered financial ratios and climate stress"
    );
    Ok(out)
}
