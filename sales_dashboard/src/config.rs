//! Report configuration layered from defaults, files and environment

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default values for configuration
const DEFAULT_DATA_PATH: &str = "data/daily_sales.csv";
const DEFAULT_MODEL_PATH: &str = "models/sales_model.json";
const DEFAULT_HORIZON: i64 = 30;
const DEFAULT_SCENARIO: &str = "none";
const DEFAULT_HISTORY_WINDOW: i64 = 90;
const DEFAULT_COMBINED_WINDOW: i64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_FILE: &str = "config/default";
const ENV_PREFIX: &str = "SALES";

/// Bounds of the forecast horizon offered to users
pub const MIN_HORIZON: usize = 7;
pub const MAX_HORIZON: usize = 90;

#[derive(Debug, Error)]
pub enum DashboardConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one report run
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// CSV with `date`, `sales` and optionally `onpromotion` columns
    pub data_path: PathBuf,
    /// JSON parameters of the pre-fit model
    pub model_path: PathBuf,
    /// Days to forecast
    pub horizon: usize,
    /// `none`, `full` or a comma separated plan
    pub scenario: String,
    /// Days of history summarised in the report
    pub history_window: usize,
    /// Days of history placed before the forecast in the combined series
    pub combined_window: usize,
    /// Fail on missing or non-numeric cells instead of replacing them with zero
    pub strict_data: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl DashboardConfig {
    /// Check the values the report relies on
    pub fn validate(&self) -> Result<(), DashboardConfigError> {
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&self.horizon) {
            return Err(DashboardConfigError::Invalid(format!(
                "horizon must be between {} and {} days, got {}",
                MIN_HORIZON, MAX_HORIZON, self.horizon
            )));
        }
        if self.history_window == 0 || self.combined_window == 0 {
            return Err(DashboardConfigError::Invalid(
                "history windows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the report configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. `config/default.toml` when present
/// 3. The file given on the command line, which must exist
/// 4. Environment variables (`SALES__HORIZON`, `SALES__DATA_PATH`, ...)
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, DashboardConfigError> {
    let mut builder = Config::builder()
        .set_default("data_path", DEFAULT_DATA_PATH)?
        .set_default("model_path", DEFAULT_MODEL_PATH)?
        .set_default("horizon", DEFAULT_HORIZON)?
        .set_default("scenario", DEFAULT_SCENARIO)?
        .set_default("history_window", DEFAULT_HISTORY_WINDOW)?
        .set_default("combined_window", DEFAULT_COMBINED_WINDOW)?
        .set_default("strict_data", false)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(CONFIG_FILE).required(false));

    if let Some(path) = path {
        info!("Loading configuration file {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
