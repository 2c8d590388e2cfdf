//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod eda;
pub mod run;

use std::path::Path;

use agririsk_core::frame::Dataset;

use crate::{CliError, Result};

/// Load the input dataset, reporting a missing file by name.
pub(crate) fn load_input(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(adapter_loader::read_dataset(path)?)
}
