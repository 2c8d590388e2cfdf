//! End-to-end run: raw records to the scenario-enriched final dataset.
//!
//! Stage order:
//!
//! 1. feature engineering on raw values
//! 2. clean dataset (identifier dropped, categories encoded, numerics scaled)
//! 3. proxy variants, agreement table and baseline selection
//! 4. profit model, then baseline-proxy model
//! 5. environmental and present-state carbon indices
//! 6. revenue projection and discounting
//! 7. future profit and carbon risk indices
//! 8. stranding flag, category reconstruction and climate profile

use agririsk_core::config::{BaselineStrategy, PipelineConfig};
use agririsk_core::frame::{Column, Dataset};
use agririsk_core::schema::{
    CLIMATE_PROFILE, ENTERPRISE_SIZE, FINANCIAL_RISK_LEVEL, FUTURE_EMISSIONS_PROXY, NET_PROFIT,
    PRED_EMISSIONS_PROXY, PRED_FUTURE_REVENUE, PRED_NET_PROFIT, PROFIT_MARGIN, REVENUE,
};
use agririsk_models::features::engineer_features;
use agririsk_models::preprocessing::{build_clean_dataset, CleanDataset};
use agririsk_models::proxies::{
    add_proxy_variants, compare_proxies, selector_for, BaselineSelector, ProxyComparison,
};
use agririsk_optimiser::trainer::{predict_column, train_ridge_regression, ModelResult, ModelSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;
use crate::scenarios::{
    add_adjusted_profit, add_carbon_cost_index, add_carbon_risk_score, add_discounted_revenue,
    add_environmental_risk_index, add_future_carbon_risk_index, add_future_profit_index,
    project_revenue_paths,
};
use crate::stranding::{add_climate_profile, add_stranded_flag, reconstruct_categories, stranded_count};

/// Labels and text fields never used as model features.
pub const NON_FEATURE_COLUMNS: [&str; 3] = [ENTERPRISE_SIZE, CLIMATE_PROFILE, FINANCIAL_RISK_LEVEL];

/// Exclusions for the net-profit model: the target, its leaking margin and
/// the non-feature columns.
pub fn profit_exclusions() -> Vec<&'static str> {
    let mut exclude = vec![NET_PROFIT, FINANCIAL_RISK_LEVEL, PROFIT_MARGIN];
    exclude.extend(NON_FEATURE_COLUMNS);
    exclude
}

/// Exclusions for the emissions model: the baseline proxy and the
/// non-feature columns.
pub fn emissions_exclusions(baseline_proxy: &str) -> Vec<&str> {
    let mut exclude = vec![baseline_proxy];
    exclude.extend(NON_FEATURE_COLUMNS);
    exclude
}

/// Serialisable record of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed used for resampling
    pub random_seed: u64,
    /// Baseline selection strategy
    pub baseline_strategy: BaselineStrategy,
    /// Selected baseline emissions proxy
    pub baseline_proxy: String,
    /// Scenario driving the stranding flag
    pub severe_scenario: String,
    /// Rows processed
    pub n_rows: usize,
    /// Columns in the final dataset
    pub n_columns: usize,
    /// Rows flagged as stranded
    pub stranded: usize,
    /// Net-profit model metrics
    pub profit_model: ModelSummary,
    /// Emissions model metrics
    pub emissions_model: ModelSummary,
}

/// Everything a run produces.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Model-ready snapshot, taken before proxies are added
    pub clean: CleanDataset,
    /// Pairwise proxy agreement table
    pub stability: Vec<ProxyComparison>,
    /// Selected baseline emissions proxy
    pub baseline_proxy: String,
    /// Net-profit model
    pub profit_model: ModelResult,
    /// Baseline-proxy model
    pub emissions_model: ModelResult,
    /// Dataset with every stage applied
    pub final_dataset: Dataset,
    /// Run record
    pub summary: RunSummary,
}

/// Run every stage on a raw dataset.
///
/// # Errors
///
/// The first failing stage aborts the run; its error is returned unchanged.
pub fn run_pipeline(raw: &Dataset, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;
    info!(rows = raw.n_rows(), columns = raw.n_cols(), "Starting pipeline");

    let features = engineer_features(raw)?;
    let clean = build_clean_dataset(&features)?;

    let data = add_proxy_variants(&clean.data)?;
    let stability = compare_proxies(&data, config.top_risk_quantile)?;
    let baseline_proxy = selector_for(config.baseline_strategy, &config.baseline_proxy)
        .select(&data, &stability);
    info!(baseline = %baseline_proxy, strategy = %config.baseline_strategy, "Selected baseline proxy");

    let (data, profit_model, emissions_model) = train_models(&data, &baseline_proxy, config)?;
    let data = add_scenario_indices(&data, &baseline_proxy, config)?;

    let data = add_stranded_flag(&data, &config.severe_scenario)?;
    let data = reconstruct_categories(&data, &clean.encoding)?;
    let data = add_climate_profile(&data)?;

    let summary = RunSummary {
        random_seed: config.random_seed,
        baseline_strategy: config.baseline_strategy,
        baseline_proxy: baseline_proxy.clone(),
        severe_scenario: config.severe_scenario.clone(),
        n_rows: data.n_rows(),
        n_columns: data.n_cols(),
        stranded: stranded_count(&data)?,
        profit_model: profit_model.summary(),
        emissions_model: emissions_model.summary(),
    };
    info!(
        rows = summary.n_rows,
        columns = summary.n_columns,
        stranded = summary.stranded,
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        clean,
        stability,
        baseline_proxy,
        profit_model,
        emissions_model,
        final_dataset: data,
        summary,
    })
}

/// Fit both models and append `Pred_Net_Profit`, `Pred_Emissions_Proxy` and
/// `Future_Emissions_Proxy`.
fn train_models(
    data: &Dataset,
    baseline_proxy: &str,
    config: &PipelineConfig,
) -> Result<(Dataset, ModelResult, ModelResult), PipelineError> {
    let profit_model = train_ridge_regression(
        data,
        NET_PROFIT,
        &profit_exclusions(),
        config.random_seed,
        config.cv_folds,
    )?;
    let data = predict_column(
        data,
        &profit_model.pipeline,
        &profit_model.features,
        PRED_NET_PROFIT,
    )?;

    let emissions_model = train_ridge_regression(
        &data,
        baseline_proxy,
        &emissions_exclusions(baseline_proxy),
        config.random_seed,
        config.cv_folds,
    )?;
    let mut data = predict_column(
        &data,
        &emissions_model.pipeline,
        &emissions_model.features,
        PRED_EMISSIONS_PROXY,
    )?;
    let future = data.column(PRED_EMISSIONS_PROXY)?.clone();
    data.insert_column(FUTURE_EMISSIONS_PROXY, future)?;

    Ok((data, profit_model, emissions_model))
}

/// Present-state and projected scenario columns.
fn add_scenario_indices(
    data: &Dataset,
    baseline_proxy: &str,
    config: &PipelineConfig,
) -> Result<Dataset, PipelineError> {
    let scenarios = &config.scenarios;
    let data = add_environmental_risk_index(data, scenarios, FUTURE_EMISSIONS_PROXY)?;
    let data = add_carbon_cost_index(&data, scenarios, baseline_proxy)?;
    let data = add_adjusted_profit(&data, scenarios, PRED_NET_PROFIT)?;
    let mut data = add_carbon_risk_score(&data, scenarios, PRED_NET_PROFIT)?;

    // Revenue is the projection base; it carries the clean dataset's scaling.
    let base = data.numeric(REVENUE)?.to_vec();
    data.insert_column(PRED_FUTURE_REVENUE, Column::Numeric(base))?;
    let data = project_revenue_paths(&data, PRED_FUTURE_REVENUE, config.years, config.growth_rate)?;
    let data = add_discounted_revenue(&data, config.years, config.discount_rate)?;
    info!(years = config.years, "Projected revenue paths");

    let data = add_future_profit_index(&data, scenarios, PRED_FUTURE_REVENUE, FUTURE_EMISSIONS_PROXY)?;
    let data = add_future_carbon_risk_index(&data, scenarios, PRED_FUTURE_REVENUE)?;
    Ok(data)
}
