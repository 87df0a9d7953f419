//! Summary statistics for the sales history and a scenario evaluation

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::evaluator::ScenarioEvaluation;
use crate::models::{DatedSeries, DatedValue};
use crate::utils::mean;
use serde::Serialize;

/// Key figures of the recorded history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryKpis {
    /// Sales on the last recorded day
    pub last_recorded_sales: f64,
    /// Mean daily sales over the whole history
    pub average_daily_sales: f64,
}

impl HistoryKpis {
    pub fn from_history(history: &SalesHistory) -> Result<Self> {
        let last = history.records().last().ok_or(ForecastError::EmptyHistory)?;
        let average = mean(&history.sales()).ok_or(ForecastError::EmptyHistory)?;

        Ok(Self {
            last_recorded_sales: last.sales,
            average_daily_sales: average,
        })
    }
}

impl std::fmt::Display for HistoryKpis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "History:")?;
        writeln!(f, "  Last Recorded Sales:  {:.2}", self.last_recorded_sales)?;
        writeln!(f, "  Average Daily Sales:  {:.2}", self.average_daily_sales)?;
        Ok(())
    }
}

/// Key figures of a scenario evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastKpis {
    /// Sum of the forecast under the plan
    pub total_forecasted_sales: f64,
    /// Mean of the forecast under the plan
    pub average_forecasted_sales: f64,
    /// Sum of the uplift over the baseline
    pub total_promotion_boost: f64,
    /// Number of promoted days in the plan
    pub promotion_days: usize,
}

impl ForecastKpis {
    pub fn from_evaluation(evaluation: &ScenarioEvaluation) -> Self {
        Self {
            total_forecasted_sales: evaluation.forecast.total(),
            average_forecasted_sales: evaluation.forecast.mean().unwrap_or(0.0),
            total_promotion_boost: evaluation.uplift.total(),
            promotion_days: evaluation.plan.promotion_days(),
        }
    }
}

impl std::fmt::Display for ForecastKpis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast:")?;
        writeln!(f, "  Total Forecasted Sales:    {:.2}", self.total_forecasted_sales)?;
        writeln!(f, "  Average Forecasted Sales:  {:.2}", self.average_forecasted_sales)?;
        writeln!(f, "  Total Promotion Boost:     {:.2}", self.total_promotion_boost)?;
        writeln!(f, "  Promotion Days:            {}", self.promotion_days)?;
        Ok(())
    }
}

/// Sales of the last `n` recorded days
pub fn history_tail(history: &SalesHistory, n: usize) -> DatedSeries {
    DatedSeries::from_points(
        history
            .tail(n)
            .iter()
            .map(|r| DatedValue {
                date: r.date,
                value: r.sales,
            })
            .collect(),
    )
}

/// The last `n` recorded days followed by the forecast
pub fn combined_series(history: &SalesHistory, forecast: &DatedSeries, n: usize) -> DatedSeries {
    let mut points = history_tail(history, n).points().to_vec();
    points.extend_from_slice(forecast.points());
    DatedSeries::from_points(points)
}
