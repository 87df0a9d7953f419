//! Text rendering of the sales forecast report

use sales_forecast::models::DatedSeries;
use sales_forecast::summary::{ForecastKpis, HistoryKpis};
use sales_forecast::{PromotionScenario, ScenarioEvaluation};
use serde::Serialize;
use std::fmt;

/// Format a value rounded to a whole number with thousands separators, e.g. `-12,346`
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Everything the report shows for one evaluation
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub scenario: &'a PromotionScenario,
    pub history: HistoryKpis,
    pub forecast: ForecastKpis,
    /// Recent history shown as the trend
    pub recent: DatedSeries,
    /// Recent history followed by the forecast
    pub combined: DatedSeries,
    pub evaluation: &'a ScenarioEvaluation,
}

impl Report<'_> {
    /// Pretty-printed JSON of the whole report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store Sales Forecast ({})", self.scenario)?;
        writeln!(f)?;

        writeln!(f, "Key Performance Indicators")?;
        writeln!(
            f,
            "  Last Recorded Sales:        {}",
            format_thousands(self.history.last_recorded_sales)
        )?;
        writeln!(
            f,
            "  Average Daily Sales:        {}",
            format_thousands(self.history.average_daily_sales)
        )?;
        writeln!(
            f,
            "  Promotion Days (Forecast):  {}",
            self.forecast.promotion_days
        )?;
        writeln!(f)?;

        if let (Some(first), Some(last)) = (self.recent.points().first(), self.recent.points().last())
        {
            writeln!(
                f,
                "Historical Sales Trend ({} days, {} to {})",
                self.recent.len(),
                first.date,
                last.date
            )?;
            writeln!(
                f,
                "  Mean: {}",
                format_thousands(self.recent.mean().unwrap_or(0.0))
            )?;
            writeln!(f)?;
        }

        if let (Some(first), Some(last)) =
            (self.combined.points().first(), self.combined.points().last())
        {
            writeln!(
                f,
                "Forecast Window: {} to {} ({} historical + {} forecast days)",
                first.date,
                last.date,
                self.combined.len() - self.evaluation.horizon(),
                self.evaluation.horizon()
            )?;
            writeln!(f)?;
        }

        writeln!(f, "Forecast Summary ({} days)", self.evaluation.horizon())?;
        writeln!(
            f,
            "  Total Forecasted Sales:     {}",
            format_thousands(self.forecast.total_forecasted_sales)
        )?;
        writeln!(
            f,
            "  Average Forecasted Sales:   {}",
            format_thousands(self.forecast.average_forecasted_sales)
        )?;
        writeln!(
            f,
            "  Total Promotion Boost:      {}",
            format_thousands(self.forecast.total_promotion_boost)
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<12}{:>6}{:>14}{:>14}{:>12}",
            "Date", "Promo", "Forecast", "Baseline", "Boost"
        )?;
        let rows = self
            .evaluation
            .forecast
            .points()
            .iter()
            .zip(self.evaluation.baseline.points())
            .zip(self.evaluation.uplift.points())
            .zip(self.evaluation.plan.indicators());
        for (((forecast, baseline), uplift), promo) in rows {
            writeln!(
                f,
                "{:<12}{:>6}{:>14}{:>14}{:>12}",
                forecast.date.to_string(),
                promo,
                format_thousands(forecast.value),
                format_thousands(baseline.value),
                format_thousands(uplift.value)
            )?;
        }

        Ok(())
    }
}
