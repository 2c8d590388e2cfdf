//! Run command implementation
//!
//! Executes the full pipeline and writes snapshots, tables and reports.

use agririsk_risk::run_pipeline;
use infra_config::AppConfig;
use tracing::info;

use super::load_input;
use crate::report::{render_run_summary, render_stability_table, write_text, RunReport};
use crate::Result;

/// Run the pipeline command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Starting pipeline run...");
    info!("  Input: {}", config.input_path.display());
    info!("  Output directory: {}", config.output_dir.display());

    let raw = load_input(&config.input_path)?;
    let output = run_pipeline(&raw, &config.pipeline)?;

    let tables = config.table_dir();
    let reports = config.report_dir();

    adapter_loader::write_dataset(&config.clean_data_path, &output.clean.data)?;
    adapter_loader::write_records(tables.join("proxy_stability.csv"), &output.stability)?;
    write_text(
        &tables.join("proxy_stability.md"),
        &render_stability_table(&output.stability),
    )?;
    adapter_loader::write_dataset(
        tables.join("final_dataset_snapshot.csv"),
        &output.final_dataset,
    )?;

    write_text(
        &reports.join("run_summary.md"),
        &render_run_summary(&output.summary),
    )?;
    let json = serde_json::to_string_pretty(&RunReport::now(&output.summary))?;
    write_text(&reports.join("run_summary.json"), &json)?;

    info!(
        baseline = %output.baseline_proxy,
        stranded = output.summary.stranded,
        rows = output.summary.n_rows,
        "Run complete"
    );
    Ok(())
}
