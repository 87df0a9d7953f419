//! Command line arguments and how they override the configuration

use crate::config::DashboardConfig;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use sales_forecast::PromotionScenario;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sales_report",
    version,
    about = "Forecast store sales under a promotion scenario"
)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Daily sales CSV
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Pre-fit model parameters (JSON)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Forecast horizon in days (7 to 90)
    #[arg(long, short = 'n')]
    pub horizon: Option<usize>,

    /// Promotion scenario
    #[arg(long, value_enum)]
    pub scenario: Option<ScenarioArg>,

    /// Custom per-day plan, e.g. `--plan 0,1,1,0,...`
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub plan: Option<Vec<i64>>,

    /// Fail on missing or non-numeric cells in the sales data
    #[arg(long)]
    pub strict: bool,

    /// Print the evaluation as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Write the forecast table to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    /// No promotion on any day
    #[value(name = "none")]
    NoPromotion,
    /// Promotion on every day
    #[value(name = "full")]
    FullPromotion,
    /// Per-day plan given with --plan
    Custom,
}

impl Cli {
    /// Override configuration values with the flags that were given
    pub fn apply_to(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if self.strict {
            config.strict_data = true;
        }
    }

    /// Resolve the scenario from the flags, falling back to the configuration
    pub fn scenario(&self, config: &DashboardConfig) -> Result<PromotionScenario> {
        match (self.scenario, &self.plan) {
            (Some(ScenarioArg::NoPromotion), None) => Ok(PromotionScenario::NoPromotion),
            (Some(ScenarioArg::FullPromotion), None) => Ok(PromotionScenario::FullPromotion),
            (Some(ScenarioArg::Custom), Some(plan)) | (None, Some(plan)) => {
                Ok(PromotionScenario::Custom(plan.clone()))
            }
            (Some(ScenarioArg::Custom), None) => bail!("--scenario custom requires --plan"),
            (Some(_), Some(_)) => bail!("--plan can only be used with --scenario custom"),
            (None, None) => Ok(config.scenario.parse()?),
        }
    }
}
