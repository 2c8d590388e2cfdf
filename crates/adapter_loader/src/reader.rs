//! Delimited-file ingest with column type inference.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use agririsk_core::frame::{Column, Dataset};
use tracing::{debug, info};

use crate::error::LoaderError;

/// Infer a column from its text cells.
///
/// - numeric if every non-empty cell parses as `f64` (empty cells become NaN)
/// - boolean if every cell is `true` or `false` in any case
/// - categorical otherwise, cells kept verbatim
///
/// # Examples
///
/// ```
/// use adapter_loader::infer_column;
/// use agririsk_core::frame::Column;
///
/// let cells = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
/// assert_eq!(infer_column(cells(&["1", "2.5"])), Column::from(vec![1.0, 2.5]));
/// assert_eq!(infer_column(cells(&["True", "false"])), Column::from(vec![true, false]));
/// assert_eq!(infer_column(cells(&["East", "3"])), Column::from(vec!["East", "3"]));
/// ```
pub fn infer_column(cells: Vec<String>) -> Column {
    let numeric: Option<Vec<f64>> = cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                Some(f64::NAN)
            } else {
                c.parse::<f64>().ok()
            }
        })
        .collect();
    if let Some(values) = numeric {
        return Column::Numeric(values);
    }

    let boolean: Option<Vec<bool>> = cells.iter().map(|c| parse_bool(c)).collect();
    if let Some(values) = boolean {
        return Column::Boolean(values);
    }

    Column::Categorical(cells)
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Read a dataset from any reader holding a header row and records.
pub fn read_dataset_from<R: Read>(source: R) -> Result<Dataset, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    for (i, name) in headers.iter().enumerate() {
        if headers[..i].contains(name) {
            return Err(LoaderError::DuplicateHeader(name.clone()));
        }
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            column.push(value.to_string());
        }
    }

    let mut data = Dataset::new();
    for (name, column_cells) in headers.into_iter().zip(cells) {
        let column = infer_column(column_cells);
        debug!(column = %name, kind = %column.kind(), "Inferred column type");
        data.insert_column(name, column)?;
    }
    Ok(data)
}

/// Read a dataset from a file.
///
/// # Errors
///
/// `Io` if the file cannot be opened, `Csv` for ragged or malformed records,
/// `DuplicateHeader` for repeated column names.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoaderError::io(path, e))?;
    let data = read_dataset_from(file)?;
    info!(
        path = %path.display(),
        rows = data.n_rows(),
        columns = data.n_cols(),
        "Loaded dataset"
    );
    Ok(data)
}
