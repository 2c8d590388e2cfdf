//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths.

use agririsk_core::config::{BaselineStrategy, PipelineConfig};
use agririsk_core::frame::{Column, Dataset};
use agririsk_core::math::stats::{quantile, shift_to_zero_min, standardize};
use agririsk_core::math::{solve_cholesky, Matrix, StandardScaler};
use agririsk_core::schema;
use agririsk_core::types::{ColumnKind, DataError, PresetScenarioType, ScenarioSet};

#[test]
fn test_frame_exports() {
    let data = Dataset::from_columns(vec![
        (schema::REVENUE, Column::from(vec![1.0, 2.0])),
        (schema::REGION, Column::from(vec!["East", "West"])),
    ])
    .unwrap();
    assert_eq!(data.columns_of_kind(ColumnKind::Categorical), vec!["Region"]);
}

#[test]
fn test_math_exports() {
    let m = Matrix::from_columns(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    let x = solve_cholesky(&m.gram(), &[2.0, 3.0]).unwrap();
    assert_eq!(x, vec![2.0, 3.0]);

    let scaler = StandardScaler::fit(&[0.0, 2.0]);
    assert_eq!(scaler.transform(&[2.0]), vec![1.0]);

    assert_eq!(shift_to_zero_min(&[-1.0, 1.0]), vec![0.0, 2.0]);
    assert_eq!(quantile(&[0.0, 10.0], 0.5), 5.0);
    assert_eq!(standardize(&[5.0, 5.0], 1), vec![0.0, 0.0]);
}

#[test]
fn test_config_exports() {
    let config = PipelineConfig::default().with_baseline_strategy(BaselineStrategy::MostStable);
    assert!(config.validate().is_ok());
    assert_eq!(
        config.scenarios,
        ScenarioSet::standard(),
        "default scenarios are the presets"
    );
    assert_eq!(PresetScenarioType::all().len(), 3);
}

#[test]
fn test_error_exports() {
    let err: DataError = DataError::degenerate_denominator(schema::REVENUE, 0);
    assert!(matches!(err, DataError::DegenerateDenominator { row: 0, .. }));
}
