//! Typed column storage.

use crate::types::ColumnKind;

/// A single dataset column.
///
/// Missing numeric cells are stored as NaN and missing categorical cells as
/// an empty string.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Floating point values
    Numeric(Vec<f64>),
    /// Boolean indicator values
    Boolean(Vec<bool>),
    /// Category labels
    Categorical(Vec<String>),
}

impl Column {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Boolean(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Returns true if the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage kind.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Boolean(_) => ColumnKind::Boolean,
            Column::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Numeric(v) => v.iter().filter(|x| x.is_nan()).count(),
            Column::Boolean(_) => 0,
            Column::Categorical(v) => v.iter().filter(|s| s.is_empty()).count(),
        }
    }

    /// Values cast to f64, booleans becoming 0/1.
    ///
    /// Returns `None` for categorical columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Numeric(v) => Some(v.clone()),
            Column::Boolean(v) => Some(v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect()),
            Column::Categorical(_) => None,
        }
    }

    /// Render one cell as text.
    ///
    /// Booleans render as `True`/`False` and NaN renders empty, so that
    /// snapshots read the same way as the raw input.
    pub fn cell_to_string(&self, row: usize) -> String {
        match self {
            Column::Numeric(v) => {
                let x = v[row];
                if x.is_nan() {
                    String::new()
                } else {
                    x.to_string()
                }
            }
            Column::Boolean(v) => {
                if v[row] {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
            Column::Categorical(v) => v[row].clone(),
        }
    }

    /// Select rows by index, in the given order.
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(indices.iter().map(|&i| v[i]).collect()),
            Column::Boolean(v) => Column::Boolean(indices.iter().map(|&i| v[i]).collect()),
            Column::Categorical(v) => {
                Column::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(values)
    }
}

impl From<Vec<bool>> for Column {
    fn from(values: Vec<bool>) -> Self {
        Column::Boolean(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Categorical(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Categorical(values.into_iter().map(String::from).collect())
    }
}
