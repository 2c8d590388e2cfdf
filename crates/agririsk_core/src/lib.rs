//! # agririsk_core: Dataset and Numerical Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! agririsk_core is the bottom layer of the workspace, providing:
//! - Typed tabular data: `Dataset`, `Column` (`frame`)
//! - The fixed column-name contract of enterprise records (`schema`)
//! - Error types: `DataError`, `ColumnKind` (`types::error`)
//! - Carbon-price scenarios: `CarbonScenario`, `ScenarioSet` (`types::scenario`)
//! - The canonical run configuration: `PipelineConfig` (`config`)
//! - Statistics, dense linear algebra and scaling (`math`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 depends on no other agririsk crate and only on:
//! - thiserror: Error derivation
//! - serde: Configuration and scaler serialisation
//!
//! ## Usage Examples
//!
//! ```rust
//! use agririsk_core::frame::{Column, Dataset};
//! use agririsk_core::math::stats::zscore;
//! use agririsk_core::config::PipelineConfig;
//!
//! let data = Dataset::from_columns(vec![
//!     ("Revenue", Column::from(vec![100.0, 200.0, 300.0])),
//! ]).unwrap();
//! let z = zscore(data.numeric("Revenue").unwrap());
//! assert!(z[1].abs() < 1e-12);
//!
//! let config = PipelineConfig::default();
//! assert_eq!(config.scenarios.len(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod frame;
pub mod math;
pub mod schema;
pub mod types;
