//! Export of scenario evaluations as CSV or JSON

use crate::error::Result;
use crate::evaluator::ScenarioEvaluation;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ForecastRow {
    date: NaiveDate,
    forecast: f64,
    baseline: f64,
    uplift: f64,
}

/// Write one `date,forecast,baseline,uplift` row per forecast day
pub fn write_forecast_csv<W: Write>(writer: W, evaluation: &ScenarioEvaluation) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let rows = evaluation
        .forecast
        .points()
        .iter()
        .zip(evaluation.baseline.points())
        .zip(evaluation.uplift.points());
    for ((forecast, baseline), uplift) in rows {
        csv_writer.serialize(ForecastRow {
            date: forecast.date,
            forecast: forecast.value,
            baseline: baseline.value,
            uplift: uplift.value,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Serialize the evaluation as pretty-printed JSON
pub fn to_json(evaluation: &ScenarioEvaluation) -> Result<String> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}
