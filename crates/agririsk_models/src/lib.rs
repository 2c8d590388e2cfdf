//! # AgriRisk Models (L2: Business Logic)
//!
//! Turns raw enterprise records into model-ready data.
//!
//! This crate provides:
//! - Financial ratios and the climate-stress composite (`features`)
//! - Emissions-proxy variants, their agreement table and baseline
//!   selection strategies (`proxies`)
//! - Identifier removal, one-hot encoding with a reference-level record and
//!   numeric scaling (`preprocessing`)
//! - Dataset profiling (`eda`)
//!
//! ## Design Principles
//!
//! - **Copy-on-write stages**: every function takes `&Dataset` and returns a
//!   new dataset
//! - **Explicit metadata**: encodings and scalers are returned alongside the
//!   data they produced
//! - **Pluggable policy**: baseline selection is a `BaselineSelector` trait

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod eda;
pub mod features;
pub mod preprocessing;
pub mod proxies;
