//! Exploratory data profile: shape, column kinds, missing counts,
//! duplicates and a numeric summary table.

use std::collections::HashSet;

use agririsk_core::frame::{Column, Dataset};
use agririsk_core::math::stats::{count, max_value, mean, min_value, quantile, std_dev};
use serde::{Deserialize, Serialize};

/// Dataset profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdaSummary {
    /// Row count
    pub n_rows: usize,
    /// Column count
    pub n_cols: usize,
    /// Column name and storage kind, in column order
    pub dtypes: Vec<(String, String)>,
    /// Column name and missing-cell count, in column order
    pub missing_by_col: Vec<(String, usize)>,
    /// Rows identical to an earlier row
    pub n_duplicates: usize,
}

impl EdaSummary {
    /// Total missing cells.
    pub fn total_missing(&self) -> usize {
        self.missing_by_col.iter().map(|(_, n)| n).sum()
    }
}

/// Profile a dataset.
pub fn compute_eda_summary(data: &Dataset) -> EdaSummary {
    let mut seen = HashSet::with_capacity(data.n_rows());
    let n_duplicates = (0..data.n_rows())
        .filter(|&row| !seen.insert(data.row_strings(row)))
        .count();

    EdaSummary {
        n_rows: data.n_rows(),
        n_cols: data.n_cols(),
        dtypes: data
            .iter()
            .map(|(n, c)| (n.to_string(), c.kind().to_string()))
            .collect(),
        missing_by_col: data
            .iter()
            .map(|(n, c)| (n.to_string(), c.missing_count()))
            .collect(),
        n_duplicates,
    }
}

/// Summary statistics of one numeric column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescribeRow {
    /// Column name
    pub column: String,
    /// Non-missing values
    pub count: usize,
    /// Mean
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Minimum
    pub min: f64,
    /// 25th percentile
    #[serde(rename = "25%")]
    pub q25: f64,
    /// Median
    #[serde(rename = "50%")]
    pub q50: f64,
    /// 75th percentile
    #[serde(rename = "75%")]
    pub q75: f64,
    /// Maximum
    pub max: f64,
}

/// Summary statistics for every numeric column, in column order.
pub fn describe(data: &Dataset) -> Vec<DescribeRow> {
    data.iter()
        .filter_map(|(name, column)| match column {
            Column::Numeric(v) => Some(DescribeRow {
                column: name.to_string(),
                count: count(v),
                mean: mean(v),
                std: std_dev(v, 1),
                min: min_value(v),
                q25: quantile(v, 0.25),
                q50: quantile(v, 0.50),
                q75: quantile(v, 0.75),
                max: max_value(v),
            }),
            _ => None,
        })
        .collect()
}
