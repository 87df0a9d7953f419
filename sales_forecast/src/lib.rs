//! # Sales Forecast
//!
//! Promotion scenario evaluation for pre-fit daily sales forecasting models.
//!
//! ## Features
//!
//! - Daily sales history loading from CSV, with coercion of bad cells reported
//! - Promotion scenarios (`none`, `full` or a custom per-day plan)
//! - Promoted forecast, no-promotion baseline and per-day uplift
//! - Summary figures for the history and the forecast
//! - A JSON-serialized regression model with ARMA errors
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_forecast::data::DataLoader;
//! use sales_forecast::evaluator::evaluate;
//! use sales_forecast::models::arimax::RegressionArmaModel;
//! use sales_forecast::plan::PromotionScenario;
//! use sales_forecast::summary::ForecastKpis;
//!
//! let history = DataLoader::from_csv("data/daily_sales.csv")?;
//! let model = RegressionArmaModel::load("models/sales_model.json")?;
//!
//! let evaluation = evaluate(&model, &history, 30, &PromotionScenario::FullPromotion)?;
//! println!("{}", ForecastKpis::from_evaluation(&evaluation));
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod models;
pub mod plan;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, SalesHistory, SalesRecord};
pub use crate::error::{ForecastError, Result};
pub use crate::evaluator::{evaluate, ScenarioEvaluation};
pub use crate::models::{DatedSeries, DatedValue, ExogMatrix, PromotionForecaster};
pub use crate::plan::{PromotionPlan, PromotionScenario};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
