//! Categorical encoding and numeric standardisation.
//!
//! Encoding drops the first (sorted) level of each categorical column and
//! records that reference level in an [`OneHotEncoding`], so downstream
//! stages can rebuild the original labels without guessing.

use agririsk_core::frame::{Column, Dataset};
use agririsk_core::math::StandardScaler;
use agririsk_core::schema::{CATEGORICAL_COLUMNS, ENTERPRISE_ID, ENTERPRISE_SIZE, FINANCIAL_RISK_LEVEL, REGION};
use agririsk_core::types::{ColumnKind, DataError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Encoding record for one categorical column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedColumn {
    /// Source column name
    pub column: String,
    /// Dropped level, implied when no indicator is set
    pub reference: String,
    /// Levels that received an indicator column, in order
    pub levels: Vec<String>,
}

impl EncodedColumn {
    /// Indicator column names, in order.
    pub fn indicator_columns(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(|level| indicator_name(&self.column, level))
            .collect()
    }
}

/// Name of the indicator column for `level` of `column`.
pub fn indicator_name(column: &str, level: &str) -> String {
    format!("{}_{}", column, level)
}

/// Companion record of a one-hot encoding: column to reference level and
/// encoded levels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoding {
    columns: Vec<EncodedColumn>,
}

impl OneHotEncoding {
    /// Record from explicit column entries.
    pub fn new(columns: Vec<EncodedColumn>) -> Self {
        Self { columns }
    }

    /// The conventional record for region and enterprise size, for use when
    /// no record was captured at encoding time.
    ///
    /// Region falls back to `East` (encoded North, South, West) and
    /// enterprise size to `Large` (encoded Medium, Small).
    pub fn conventional() -> Self {
        let entry = |column: &str, reference: &str, levels: &[&str]| EncodedColumn {
            column: column.to_string(),
            reference: reference.to_string(),
            levels: levels.iter().map(|s| s.to_string()).collect(),
        };
        Self::new(vec![
            entry(REGION, "East", &["North", "South", "West"]),
            entry(ENTERPRISE_SIZE, "Large", &["Medium", "Small"]),
        ])
    }

    /// Entry for a source column.
    pub fn get(&self, column: &str) -> Option<&EncodedColumn> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Iterate over entries in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = &EncodedColumn> {
        self.columns.iter()
    }

    /// Number of encoded columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if nothing was encoded.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Remove `Enterprise_ID` if present.
pub fn drop_unneeded_columns(data: &Dataset) -> Dataset {
    let mut out = data.clone();
    out.remove_column(ENTERPRISE_ID);
    out
}

/// Render integral numbers without a fractional part, as category labels.
fn numeric_label(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        x.to_string()
    }
}

/// Labels of a column and its sorted distinct non-missing levels.
fn labels_and_levels(column: &Column) -> (Vec<Option<String>>, Vec<String>) {
    match column {
        Column::Categorical(values) => {
            let labels: Vec<Option<String>> = values
                .iter()
                .map(|s| (!s.is_empty()).then(|| s.clone()))
                .collect();
            let mut levels: Vec<String> = labels.iter().flatten().cloned().collect();
            levels.sort();
            levels.dedup();
            (labels, levels)
        }
        Column::Numeric(values) => {
            let mut sorted: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
            sorted.sort_by(|a, b| a.total_cmp(b));
            sorted.dedup();
            let labels = values
                .iter()
                .map(|x| (!x.is_nan()).then(|| numeric_label(*x)))
                .collect();
            (labels, sorted.into_iter().map(numeric_label).collect())
        }
        Column::Boolean(values) => {
            let labels: Vec<Option<String>> = values
                .iter()
                .map(|b| Some(if *b { "True" } else { "False" }.to_string()))
                .collect();
            let mut levels = Vec::new();
            if values.iter().any(|b| !b) {
                levels.push("False".to_string());
            }
            if values.iter().any(|b| *b) {
                levels.push("True".to_string());
            }
            (labels, levels)
        }
    }
}

/// One-hot encode `columns` with k−1 boolean indicators each.
///
/// Levels are sorted ascending and the first is dropped. Indicators are
/// named `<Column>_<Level>` and appended at the end in column order; each
/// source column is removed. Missing cells set no indicator.
///
/// # Errors
///
/// `MissingColumn` if a listed column is absent.
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
/// use agririsk_models::preprocessing::one_hot_encode;
///
/// let data = Dataset::from_columns(vec![
///     ("Region", Column::from(vec!["West", "East", "North"])),
/// ]).unwrap();
///
/// let (out, encoding) = one_hot_encode(&data, &["Region"]).unwrap();
/// assert_eq!(out.column_names(), &["Region_North", "Region_West"]);
/// assert_eq!(encoding.get("Region").unwrap().reference, "East");
/// assert_eq!(out.boolean("Region_West").unwrap(), &[true, false, false]);
/// ```
pub fn one_hot_encode(
    data: &Dataset,
    columns: &[&str],
) -> Result<(Dataset, OneHotEncoding), DataError> {
    let mut out = data.clone();
    let mut indicators = Vec::new();
    let mut entries = Vec::with_capacity(columns.len());

    for &name in columns {
        let column = out.remove_column(name).ok_or_else(|| DataError::missing_column(name))?;
        let (labels, levels) = labels_and_levels(&column);
        let reference = levels.first().cloned().unwrap_or_default();
        let encoded: Vec<String> = levels.into_iter().skip(1).collect();

        for level in &encoded {
            let flags = labels
                .iter()
                .map(|l| l.as_deref() == Some(level.as_str()))
                .collect::<Vec<bool>>();
            indicators.push((indicator_name(name, level), Column::Boolean(flags)));
        }
        debug!(column = name, reference = %reference, encoded = encoded.len(), "One-hot encoded");
        entries.push(EncodedColumn {
            column: name.to_string(),
            reference,
            levels: encoded,
        });
    }

    for (name, column) in indicators {
        out.insert_column(name, column)?;
    }
    Ok((out, OneHotEncoding::new(entries)))
}

/// Fitted scalers for a set of columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    columns: Vec<(String, StandardScaler)>,
}

impl FittedScaler {
    /// Names of the scaled columns, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Scaler for one column.
    pub fn get(&self, column: &str) -> Option<&StandardScaler> {
        self.columns.iter().find(|(n, _)| n == column).map(|(_, s)| s)
    }

    /// Number of scaled columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column was scaled.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Apply the fitted scaling to the same columns of another dataset.
    pub fn transform(&self, data: &Dataset) -> Result<Dataset, DataError> {
        self.apply(data, StandardScaler::transform)
    }

    /// Map scaled columns back to their original units.
    pub fn inverse_transform(&self, data: &Dataset) -> Result<Dataset, DataError> {
        self.apply(data, StandardScaler::inverse_transform)
    }

    fn apply(
        &self,
        data: &Dataset,
        f: impl Fn(&StandardScaler, &[f64]) -> Vec<f64>,
    ) -> Result<Dataset, DataError> {
        let mut out = data.clone();
        for (name, scaler) in &self.columns {
            let values = f(scaler, data.numeric(name)?);
            out.insert_numeric(name.as_str(), values)?;
        }
        Ok(out)
    }
}

/// Standardise every numeric column not in `exclude`.
///
/// Boolean and categorical columns are left untouched. Returns the scaled
/// dataset and the fitted parameters.
pub fn scale_numeric(
    data: &Dataset,
    exclude: &[&str],
) -> Result<(Dataset, FittedScaler), DataError> {
    let columns: Vec<(String, StandardScaler)> = data
        .columns_of_kind(ColumnKind::Numeric)
        .into_iter()
        .filter(|name| !exclude.contains(&name.as_str()))
        .map(|name| {
            let scaler = data.numeric(&name).map(StandardScaler::fit)?;
            Ok((name, scaler))
        })
        .collect::<Result<_, DataError>>()?;

    let scaler = FittedScaler { columns };
    let out = scaler.transform(data)?;
    Ok((out, scaler))
}

/// Output of [`build_clean_dataset`].
#[derive(Clone, Debug, PartialEq)]
pub struct CleanDataset {
    /// Model-ready dataset
    pub data: Dataset,
    /// Reference levels of the encoded columns
    pub encoding: OneHotEncoding,
    /// Fitted numeric scaling
    pub scaler: FittedScaler,
}

/// Drop the identifier, one-hot encode region, size and quarter, then scale
/// every numeric column except `Financial_Risk_Level`.
pub fn build_clean_dataset(data: &Dataset) -> Result<CleanDataset, DataError> {
    let dropped = drop_unneeded_columns(data);
    let (encoded, encoding) = one_hot_encode(&dropped, &CATEGORICAL_COLUMNS)?;
    let (scaled, scaler) = scale_numeric(&encoded, &[FINANCIAL_RISK_LEVEL])?;
    info!(
        rows = scaled.n_rows(),
        columns = scaled.n_cols(),
        scaled = scaler.len(),
        "Built clean dataset"
    );
    Ok(CleanDataset {
        data: scaled,
        encoding,
        scaler,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agririsk_core::schema::{QUARTER, REVENUE};
    use approx::assert_relative_eq;

    fn raw() -> Dataset {
        Dataset::from_columns(vec![
            (ENTERPRISE_ID, Column::from(vec!["E1", "E2", "E3", "E4"])),
            (REVENUE, Column::from(vec![100.0, 200.0, 300.0, 400.0])),
            (FINANCIAL_RISK_LEVEL, Column::from(vec![1.0, 2.0, 3.0, 1.0])),
            (REGION, Column::from(vec!["West", "East", "South", "East"])),
            (ENTERPRISE_SIZE, Column::from(vec!["Small", "Large", "Medium", "Small"])),
            (QUARTER, Column::from(vec!["Q2", "Q1", "Q4", ""])),
        ])
        .unwrap()
    }

    #[test]
    fn test_drop_unneeded_columns() {
        let out = drop_unneeded_columns(&raw());
        assert!(!out.has_column(ENTERPRISE_ID));
        // No-op when absent.
        assert_eq!(drop_unneeded_columns(&out), out);
    }

    #[test]
    fn test_one_hot_layout() {
        let data = drop_unneeded_columns(&raw());
        let (out, encoding) = one_hot_encode(&data, &CATEGORICAL_COLUMNS).unwrap();
        assert_eq!(
            out.column_names(),
            &[
                REVENUE,
                FINANCIAL_RISK_LEVEL,
                "Region_South",
                "Region_West",
                "Enterprise_Size_Medium",
                "Enterprise_Size_Small",
                "Quarter_Q2",
                "Quarter_Q4",
            ]
        );
        assert_eq!(encoding.len(), 3);
        assert_eq!(encoding.get(REGION).unwrap().reference, "East");
        assert_eq!(encoding.get(ENTERPRISE_SIZE).unwrap().reference, "Large");
        assert_eq!(encoding.get(QUARTER).unwrap().reference, "Q1");
        assert_eq!(
            encoding.get(REGION).unwrap().indicator_columns(),
            vec!["Region_South", "Region_West"]
        );
    }

    #[test]
    fn test_missing_cells_set_no_indicator() {
        let data = drop_unneeded_columns(&raw());
        let (out, _) = one_hot_encode(&data, &[QUARTER]).unwrap();
        assert!(!out.boolean("Quarter_Q2").unwrap()[3]);
        assert!(!out.boolean("Quarter_Q4").unwrap()[3]);
    }

    #[test]
    fn test_numeric_categories_sorted_numerically() {
        let data = Dataset::from_columns(vec![(
            QUARTER,
            Column::from(vec![10.0, 2.0, 1.0, 2.0]),
        )])
        .unwrap();
        let (out, encoding) = one_hot_encode(&data, &[QUARTER]).unwrap();
        assert_eq!(encoding.get(QUARTER).unwrap().reference, "1");
        assert_eq!(out.column_names(), &["Quarter_2", "Quarter_10"]);
    }

    #[test]
    fn test_one_hot_missing_column() {
        let data = Dataset::from_columns(vec![(REVENUE, Column::from(vec![1.0]))]).unwrap();
        assert_eq!(
            one_hot_encode(&data, &[REGION]).unwrap_err(),
            DataError::missing_column(REGION)
        );
    }

    #[test]
    fn test_scale_numeric_excludes_and_skips_booleans() {
        let data = drop_unneeded_columns(&raw());
        let (encoded, _) = one_hot_encode(&data, &CATEGORICAL_COLUMNS).unwrap();
        let (scaled, scaler) = scale_numeric(&encoded, &[FINANCIAL_RISK_LEVEL]).unwrap();

        assert_eq!(scaler.column_names(), vec![REVENUE]);
        assert_eq!(
            scaled.numeric(FINANCIAL_RISK_LEVEL).unwrap(),
            encoded.numeric(FINANCIAL_RISK_LEVEL).unwrap()
        );
        assert_eq!(
            scaled.boolean("Region_West").unwrap(),
            encoded.boolean("Region_West").unwrap()
        );
        let revenue = scaled.numeric(REVENUE).unwrap();
        assert_relative_eq!(revenue.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_transform_recovers_units() {
        let data = drop_unneeded_columns(&raw());
        let (scaled, scaler) = scale_numeric(&data, &[]).unwrap();
        let back = scaler.inverse_transform(&scaled).unwrap();
        for (a, b) in back
            .numeric(REVENUE)
            .unwrap()
            .iter()
            .zip(data.numeric(REVENUE).unwrap())
        {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_build_clean_dataset() {
        let clean = build_clean_dataset(&raw()).unwrap();
        assert!(!clean.data.has_column(ENTERPRISE_ID));
        assert!(!clean.data.has_column(REGION));
        assert_eq!(
            clean.data.numeric(FINANCIAL_RISK_LEVEL).unwrap(),
            &[1.0, 2.0, 3.0, 1.0]
        );
        assert!(clean.scaler.get(REVENUE).is_some());
        assert!(clean.scaler.get(FINANCIAL_RISK_LEVEL).is_none());
        assert_eq!(clean.data.n_rows(), 4);
    }

    #[test]
    fn test_conventional_encoding() {
        let conventional = OneHotEncoding::conventional();
        let region = conventional.get(REGION).unwrap();
        assert_eq!(region.reference, "East");
        assert_eq!(region.levels, vec!["North", "South", "West"]);
        assert_eq!(conventional.get(ENTERPRISE_SIZE).unwrap().reference, "Large");
        assert!(conventional.get(QUARTER).is_none());
    }
}
