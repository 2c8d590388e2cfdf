//! # AgriRisk Risk (L3: Application)
//!
//! Scenario projection, stranding analysis and the end-to-end pipeline.
//!
//! This crate provides:
//! - Compounding revenue paths and their discounted value
//! - Carbon cost, profit and risk indices per carbon-price scenario, for the
//!   present state and the projected future
//! - The stranded-asset flag, category reconstruction and climate profiles
//! - [`run_pipeline`], sequencing every stage from raw records
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            agririsk_risk (L3)           │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - projection, indices     │
//! │  stranding   - flag, categories,       │
//! │                climate profile          │
//! │  pipeline    - end-to-end run          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │   agririsk_optimiser (L2.5)            │
//! │   agririsk_models (L2)                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use agririsk_core::frame::{Column, Dataset};
//! use agririsk_risk::scenarios::add_environmental_risk_index;
//! use agririsk_core::types::ScenarioSet;
//!
//! let data = Dataset::from_columns(vec![
//!     ("Proxy", Column::from(vec![-1.0, 0.0, 1.0])),
//! ]).unwrap();
//! let out = add_environmental_risk_index(&data, &ScenarioSet::standard(), "Proxy").unwrap();
//! assert_eq!(
//!     out.numeric("Environmental_Risk_Delayed Transition").unwrap(),
//!     &[0.0, 10.0, 20.0]
//! );
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod error;
pub mod pipeline;
pub mod scenarios;
pub mod stranding;

pub use error::PipelineError;
pub use pipeline::{run_pipeline, PipelineOutput, RunSummary};
