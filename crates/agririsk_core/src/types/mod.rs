//! Core domain types.
//!
//! This module provides:
//! - `error`: Structured error type for dataset, arithmetic and configuration failures
//! - `scenario`: Named carbon-price scenarios and the ordered scenario set
//!
//! # Re-exports
//!
//! - [`DataError`], [`ColumnKind`] from `error`
//! - [`CarbonScenario`], [`ScenarioSet`] from `scenario`

pub mod error;
pub mod scenario;

pub use error::{ColumnKind, DataError};
pub use scenario::{
    CarbonScenario, PresetScenarioType, ScenarioSet, DELAYED_TRANSITION, DIVERGENT_NET_ZERO,
    NET_ZERO_2050,
};
