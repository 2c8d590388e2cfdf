//! AgriRisk CLI - Climate-transition risk pipeline for agricultural enterprises
//!
//! This is the operational entry point for the AgriRisk workspace.
//!
//! # Commands
//!
//! - `agririsk run` - Run the full pipeline and write snapshots, tables and reports
//! - `agririsk eda` - Profile the raw dataset
//! - `agririsk check` - Validate configuration and the input schema
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-I-P-S architecture, this crate
//! orchestrates all other layers to provide a unified command-line interface.

use std::path::PathBuf;

use agririsk_core::config::BaselineStrategy;
use clap::{Parser, Subcommand};
use infra_config::{build_config, CliOverrides, LogLevel};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;
mod report;

pub use error::{CliError, Result};

/// AgriRisk climate-transition risk pipeline
#[derive(Parser)]
#[command(name = "agririsk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Raw dataset path
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output directory for tables and reports
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline
    Run {
        /// Random seed for fold shuffling and the train/test split
        #[arg(short, long)]
        seed: Option<u64>,

        /// Projection horizon in years
        #[arg(short, long)]
        years: Option<usize>,

        /// Baseline proxy strategy (preferred, most-stable)
        #[arg(short, long)]
        baseline_strategy: Option<BaselineStrategy>,
    },

    /// Profile the raw dataset
    Eda,

    /// Check configuration and input schema
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut overrides = CliOverrides {
        config_file: cli.config.clone(),
        input: cli.input.clone(),
        output_dir: cli.output_dir.clone(),
        log_level: cli.log_level,
        ..Default::default()
    };
    if let Commands::Run {
        seed,
        years,
        baseline_strategy,
    } = &cli.command
    {
        overrides.seed = *seed;
        overrides.years = *years;
        overrides.baseline_strategy = *baseline_strategy;
    }
    let config = build_config(&overrides)?;

    // Initialise tracing
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str())),
        )
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { .. } => commands::run::run(&config)?,
        Commands::Eda => commands::eda::run(&config)?,
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
