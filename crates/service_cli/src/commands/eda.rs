//! EDA command implementation
//!
//! Profiles the raw dataset and writes the describe table and summary.

use agririsk_models::eda::{compute_eda_summary, describe};
use infra_config::AppConfig;
use tracing::info;

use super::load_input;
use crate::report::{render_eda_summary, write_text};
use crate::Result;

/// Run the EDA command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Profiling {}", config.input_path.display());
    let data = load_input(&config.input_path)?;

    let summary = compute_eda_summary(&data);
    adapter_loader::write_records(config.table_dir().join("describe.csv"), &describe(&data))?;
    write_text(
        &config.report_dir().join("eda_summary.md"),
        &render_eda_summary(&summary),
    )?;

    info!(
        rows = summary.n_rows,
        columns = summary.n_cols,
        duplicates = summary.n_duplicates,
        missing = summary.total_missing(),
        "EDA complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_eda_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.csv");
        std::fs::write(&input, "Revenue,Region\n100,East\n,West\n100,East\n").unwrap();
        let config = AppConfig {
            input_path: input,
            output_dir: dir.path().join("out"),
            ..AppConfig::default()
        };

        run(&config).unwrap();

        let md = std::fs::read_to_string(config.report_dir().join("eda_summary.md")).unwrap();
        assert!(md.contains("- Rows: 3\n"));
        assert!(md.contains("- Duplicates: 1\n"));
        assert!(md.contains("- Missing values (total): 1\n"));
        let table = std::fs::read_to_string(config.table_dir().join("describe.csv")).unwrap();
        assert!(table.starts_with("column,count,mean,std,min,25%,50%,75%,max\n"));
    }
}
