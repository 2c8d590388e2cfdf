//! Compounding revenue paths and their present value.

use agririsk_core::frame::Dataset;
use agririsk_core::schema::{revenue_year_column, DISCOUNTED_FUTURE_REVENUES};
use agririsk_core::types::DataError;

/// Append `Revenue_Year_1..=Revenue_Year_{years}`.
///
/// Year 1 equals the base column; each later year grows the previous one by
/// `1 + growth_rate`.
///
/// # Errors
///
/// `InvalidConfiguration` for `years == 0`; `MissingColumn` /
/// `TypeMismatch` for the base column.
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
/// use agririsk_risk::scenarios::project_revenue_paths;
///
/// let data = Dataset::from_columns(vec![
///     ("Revenue", Column::from(vec![100.0, 200.0])),
/// ]).unwrap();
/// let out = project_revenue_paths(&data, "Revenue", 2, 0.02).unwrap();
/// assert_eq!(out.numeric("Revenue_Year_1").unwrap(), &[100.0, 200.0]);
/// assert_eq!(out.numeric("Revenue_Year_2").unwrap(), &[102.0, 204.0]);
/// ```
pub fn project_revenue_paths(
    data: &Dataset,
    base_column: &str,
    years: usize,
    growth_rate: f64,
) -> Result<Dataset, DataError> {
    if years == 0 {
        return Err(DataError::invalid_configuration(
            "projection horizon must be at least one year",
        ));
    }
    let mut path = data.numeric(base_column)?.to_vec();
    let mut out = data.clone();
    out.insert_numeric(revenue_year_column(1), path.clone())?;
    for year in 2..=years {
        path = path.iter().map(|v| v * (1.0 + growth_rate)).collect();
        out.insert_numeric(revenue_year_column(year), path.clone())?;
    }
    Ok(out)
}

/// `Σ Revenue_Year_k / (1 + r)^k` for `k = 1..=years`.
///
/// # Errors
///
/// `MissingColumn` if a year column has not been projected.
pub fn discounted_revenue_npv(
    data: &Dataset,
    years: usize,
    discount_rate: f64,
) -> Result<Vec<f64>, DataError> {
    let mut npv = vec![0.0; data.n_rows()];
    for year in 1..=years {
        let factor = (1.0 + discount_rate).powi(year as i32);
        for (acc, v) in npv.iter_mut().zip(data.numeric(&revenue_year_column(year))?) {
            *acc += v / factor;
        }
    }
    Ok(npv)
}

/// Append `Discounted_Future_Revenues`.
pub fn add_discounted_revenue(
    data: &Dataset,
    years: usize,
    discount_rate: f64,
) -> Result<Dataset, DataError> {
    let npv = discounted_revenue_npv(data, years, discount_rate)?;
    let mut out = data.clone();
    out.insert_numeric(DISCOUNTED_FUTURE_REVENUES, npv)?;
    Ok(out)
}
