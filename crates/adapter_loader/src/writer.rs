//! Snapshot and table export.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use agririsk_core::frame::Dataset;
use serde::Serialize;
use tracing::info;

use crate::error::LoaderError;

fn create_file(path: &Path) -> Result<File, LoaderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LoaderError::io(parent, e))?;
    }
    File::create(path).map_err(|e| LoaderError::io(path, e))
}

/// Write a dataset to any writer: header row, then one record per row.
///
/// Booleans are written as `True`/`False` and NaN as an empty cell.
pub fn write_dataset_to<W: Write>(sink: W, data: &Dataset) -> Result<(), LoaderError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(data.column_names())?;
    for row in 0..data.n_rows() {
        writer.write_record(data.row_strings(row))?;
    }
    writer.flush().map_err(|e| LoaderError::Csv(e.into()))?;
    Ok(())
}

/// Write a dataset to a file, creating parent directories.
pub fn write_dataset(path: impl AsRef<Path>, data: &Dataset) -> Result<(), LoaderError> {
    let path = path.as_ref();
    write_dataset_to(create_file(path)?, data)?;
    info!(
        path = %path.display(),
        rows = data.n_rows(),
        columns = data.n_cols(),
        "Wrote dataset snapshot"
    );
    Ok(())
}

/// Write serialisable rows with a header derived from the field names.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<(), LoaderError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_writer(create_file(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| LoaderError::io(path, e))?;
    info!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}
