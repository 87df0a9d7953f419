//! # Sales Dashboard
//!
//! Command line report over `sales_forecast`: loads the sales history and a
//! pre-fit model, evaluates a promotion scenario and prints the key figures,
//! the forecast table and the promotion boost.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use crate::cli::Cli;
pub use crate::config::{load_config, DashboardConfig};
pub use crate::report::{format_thousands, Report};
