//! # AgriRisk Config (Infra Layer)
//!
//! Application configuration assembled from four sources.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments ([`CliOverrides`])
//! 2. Environment variables (`AGRIRISK_*`)
//! 3. TOML config file
//! 4. Default values
//!
//! The pipeline parameters themselves live in
//! [`PipelineConfig`](agririsk_core::config::PipelineConfig); this crate only
//! decides where their values come from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod app;
mod error;

pub use app::{build_config, build_config_with, AppConfig, CliOverrides, LogLevel, ENV_PREFIX};
pub use error::ConfigError;
