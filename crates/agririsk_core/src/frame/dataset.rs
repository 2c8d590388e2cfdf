//! Ordered, named column collection.

use super::column::Column;
use crate::types::{ColumnKind, DataError};

/// Tabular dataset with a fixed row count and an ordered column set.
///
/// Stages never mutate a dataset they were handed: they clone it, append
/// columns to the clone and return it. Column order is insertion order;
/// replacing an existing column keeps its position.
///
/// # Examples
///
/// ```
/// use agririsk_core::frame::{Column, Dataset};
///
/// let mut data = Dataset::new();
/// data.insert_column("Revenue", Column::from(vec![100.0, 200.0])).unwrap();
/// data.insert_column("Region", Column::from(vec!["East", "West"])).unwrap();
///
/// assert_eq!(data.n_rows(), 2);
/// assert_eq!(data.numeric("Revenue").unwrap(), &[100.0, 200.0]);
/// assert!(data.numeric("Region").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, column)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the columns differ in length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut data = Self::new();
        for (name, column) in columns {
            data.insert_column(name, column)?;
        }
        Ok(data)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over `(name, column)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter())
    }

    /// Returns true if the named column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.position(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| DataError::missing_column(name))
    }

    /// Borrow a numeric column.
    ///
    /// # Errors
    ///
    /// `MissingColumn` if absent, `TypeMismatch` if not numeric.
    pub fn numeric(&self, name: &str) -> Result<&[f64], DataError> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            other => Err(DataError::type_mismatch(
                name,
                ColumnKind::Numeric,
                other.kind(),
            )),
        }
    }

    /// Borrow a boolean column.
    pub fn boolean(&self, name: &str) -> Result<&[bool], DataError> {
        match self.column(name)? {
            Column::Boolean(v) => Ok(v),
            other => Err(DataError::type_mismatch(
                name,
                ColumnKind::Boolean,
                other.kind(),
            )),
        }
    }

    /// Borrow a categorical column.
    pub fn categorical(&self, name: &str) -> Result<&[String], DataError> {
        match self.column(name)? {
            Column::Categorical(v) => Ok(v),
            other => Err(DataError::type_mismatch(
                name,
                ColumnKind::Categorical,
                other.kind(),
            )),
        }
    }

    /// Values of a numeric or boolean column as f64 (booleans cast to 0/1).
    pub fn feature_values(&self, name: &str) -> Result<Vec<f64>, DataError> {
        let column = self.column(name)?;
        column
            .to_f64()
            .ok_or_else(|| DataError::type_mismatch(name, ColumnKind::Numeric, column.kind()))
    }

    /// Insert a column, replacing any existing column of the same name.
    ///
    /// The first column inserted into an empty dataset fixes the row count.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the column length differs from the row count.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), DataError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(DataError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                got: column.len(),
            });
        }
        match self.position(&name) {
            Some(i) => self.columns[i] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Insert a numeric column.
    pub fn insert_numeric(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), DataError> {
        self.insert_column(name, Column::Numeric(values))
    }

    /// Remove a column, returning it if present.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let i = self.position(name)?;
        self.names.remove(i);
        Some(self.columns.remove(i))
    }

    /// Select rows by index into a new dataset.
    pub fn take_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            n_rows: indices.len(),
        }
    }

    /// Names of columns with the given storage kind, in order.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.iter()
            .filter(|(_, c)| c.kind() == kind)
            .map(|(n, _)| n.to_string())
            .collect()
    }

    /// Render a row as text cells, in column order.
    pub fn row_strings(&self, row: usize) -> Vec<String> {
        self.columns.iter().map(|c| c.cell_to_string(row)).collect()
    }
}
