//! Application configuration management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use agririsk_core::config::{BaselineStrategy, PipelineConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of every environment variable read by [`build_config`].
pub const ENV_PREFIX: &str = "AGRIRISK_";

/// Verbosity of the `agririsk` run log.
///
/// Written lowercase in TOML, `AGRIRISK_LOG_LEVEL` and `--log-level`; an
/// explicit `RUST_LOG` filter still takes precedence at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-row loader detail and everything below
    Trace,
    /// Alpha candidates, per-scenario indices, inferred column kinds
    Debug,
    /// Stage completions and the final summary
    #[default]
    Info,
    /// Baseline-proxy fallbacks and skipped category indicators
    Warn,
    /// Fatal stage failures
    Error,
}

impl LogLevel {
    /// Every level, most verbose first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Directive handed to the tracing `EnvFilter` when `RUST_LOG` is unset.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    /// Case-insensitive match against the filter directives.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Raw enterprise dataset
    pub input_path: PathBuf,
    /// Cleaned-dataset snapshot
    pub clean_data_path: PathBuf,
    /// Root of the `tables/` and `reports/` output directories
    pub output_dir: PathBuf,
    /// Pipeline parameters
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            input_path: PathBuf::from("data/AgriRiskFin_Dataset.csv"),
            clean_data_path: PathBuf::from("data/data_cleaned.csv"),
            output_dir: PathBuf::from("outputs"),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory for CSV and markdown tables.
    pub fn table_dir(&self) -> PathBuf {
        self.output_dir.join("tables")
    }

    /// Directory for run reports.
    pub fn report_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `AGRIRISK_*` variables returned by `lookup`.
    ///
    /// `lookup` receives the variable name without the prefix.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| (format!("{}{}", ENV_PREFIX, key), v));

        if let Some((_, v)) = get("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&v)?;
        }
        if let Some((_, v)) = get("INPUT") {
            self.input_path = PathBuf::from(v);
        }
        if let Some((_, v)) = get("CLEAN_DATA") {
            self.clean_data_path = PathBuf::from(v);
        }
        if let Some((_, v)) = get("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }

        let pipeline = &mut self.pipeline;
        if let Some((name, v)) = get("SEED") {
            pipeline.random_seed = parse_env(&name, &v)?;
        }
        if let Some((name, v)) = get("CV_FOLDS") {
            pipeline.cv_folds = parse_env(&name, &v)?;
        }
        if let Some((name, v)) = get("YEARS") {
            pipeline.years = parse_env(&name, &v)?;
        }
        if let Some((name, v)) = get("GROWTH_RATE") {
            pipeline.growth_rate = parse_env(&name, &v)?;
        }
        if let Some((name, v)) = get("DISCOUNT_RATE") {
            pipeline.discount_rate = parse_env(&name, &v)?;
        }
        if let Some((name, v)) = get("TOP_RISK_QUANTILE") {
            pipeline.top_risk_quantile = parse_env(&name, &v)?;
        }
        if let Some((_, v)) = get("BASELINE_PROXY") {
            pipeline.baseline_proxy = v;
        }
        if let Some((name, v)) = get("BASELINE_STRATEGY") {
            pipeline.baseline_strategy = parse_env(&name, &v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(path) = &cli.input {
            self.input_path = path.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(seed) = cli.seed {
            self.pipeline.random_seed = seed;
        }
        if let Some(years) = cli.years {
            self.pipeline.years = years;
        }
        if let Some(strategy) = cli.baseline_strategy {
            self.pipeline.baseline_strategy = strategy;
        }
    }

    /// Validate the pipeline parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvError {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Input dataset override
    pub input: Option<PathBuf>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Seed override
    pub seed: Option<u64>,
    /// Projection horizon override
    pub years: Option<usize>,
    /// Baseline strategy override
    pub baseline_strategy: Option<BaselineStrategy>,
}

/// Build configuration from all sources, reading the process environment.
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliOverrides, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env(env)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.pipeline.random_seed, 37);
        assert_eq!(config.table_dir(), PathBuf::from("outputs/tables"));
        assert_eq!(config.report_dir(), PathBuf::from("outputs/reports"));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
        assert_eq!(LogLevel::from_str(" info ").unwrap(), LogLevel::Info);
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = AppConfig::from_toml_str(
            r#"
            log_level = "debug"
            output_dir = "out"

            [pipeline]
            years = 3
            baseline_strategy = "most_stable"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.pipeline.years, 3);
        assert_eq!(config.pipeline.baseline_strategy, BaselineStrategy::MostStable);
        assert_eq!(config.pipeline.cv_folds, 5);
        assert_eq!(config.input_path, AppConfig::default().input_path);
    }

    #[test]
    fn test_toml_scenarios() {
        let config = AppConfig::from_toml_str(
            r#"
            [pipeline]
            severe_scenario = "High"

            [[pipeline.scenarios]]
            name = "Low"
            carbon_price = 5.0

            [[pipeline.scenarios]]
            name = "High"
            carbon_price = 500.0
            "#,
        )
        .unwrap();
        assert_eq!(config.pipeline.scenarios.names(), vec!["Low", "High"]);
    }

    #[test]
    fn test_toml_rejects_invalid_pipeline() {
        let err = AppConfig::from_toml_str("[pipeline]\ncv_folds = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Pipeline(_)));
        let err = AppConfig::from_toml_str("log_level = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("SEED", "11"),
                ("GROWTH_RATE", "0.03"),
                ("BASELINE_STRATEGY", "most-stable"),
                ("OUTPUT_DIR", "/tmp/agririsk"),
            ]))
            .unwrap();
        assert_eq!(config.pipeline.random_seed, 11);
        assert_eq!(config.pipeline.growth_rate, 0.03);
        assert_eq!(config.pipeline.baseline_strategy, BaselineStrategy::MostStable);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/agririsk"));
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env(&[("YEARS", "five")])).unwrap_err();
        assert!(err.to_string().contains("AGRIRISK_YEARS"));
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nrandom_seed = 1\nyears = 2\ncv_folds = 3").unwrap();

        let cli = CliOverrides {
            config_file: Some(file.path().to_path_buf()),
            seed: Some(3),
            ..Default::default()
        };
        let config =
            build_config_with(&cli, env(&[("SEED", "2"), ("YEARS", "4")])).unwrap();
        assert_eq!(config.pipeline.random_seed, 3);
        assert_eq!(config.pipeline.years, 4);
        assert_eq!(config.pipeline.cv_folds, 3);
    }

    #[test]
    fn test_final_validation_after_overrides() {
        let cli = CliOverrides {
            years: Some(0),
            ..Default::default()
        };
        assert!(build_config_with(&cli, env(&[])).is_err());
    }
}
