//! Check command implementation
//!
//! Validates the resolved configuration and the input header without
//! running any stage.

use agririsk_core::types::{CarbonScenario, PresetScenarioType};
use agririsk_models::features::validate_raw_schema;
use infra_config::AppConfig;
use tracing::{info, warn};

use super::load_input;
use crate::Result;

/// Run the check command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    let pipeline = &config.pipeline;
    info!("  Seed: {}", pipeline.random_seed);
    info!("  CV folds: {}", pipeline.cv_folds);
    info!(
        "  Horizon: {} years, growth {}, discount {}",
        pipeline.years, pipeline.growth_rate, pipeline.discount_rate
    );
    info!("  Baseline: {} ({})", pipeline.baseline_proxy, pipeline.baseline_strategy);
    for scenario in &pipeline.scenarios {
        info!("  Scenario: {}", describe_scenario(scenario));
    }
    info!("  Severe scenario: {}", pipeline.severe_scenario);

    if !config.input_path.exists() {
        warn!("Input file not found: {}", config.input_path.display());
        return Ok(());
    }
    let data = load_input(&config.input_path)?;
    validate_raw_schema(&data)?;
    info!(
        rows = data.n_rows(),
        columns = data.n_cols(),
        "Input satisfies the raw schema"
    );
    Ok(())
}

/// One-line scenario label; presets carry their narrative.
fn describe_scenario(scenario: &CarbonScenario) -> String {
    match PresetScenarioType::from_name(&scenario.name) {
        Some(preset) => format!(
            "{} @ {} ({})",
            scenario.name,
            scenario.carbon_price,
            preset.description()
        ),
        None => format!("{} @ {} (custom)", scenario.name, scenario.carbon_price),
    }
}
