//! Promotion scenario evaluation against a pre-fit model

use crate::data::SalesHistory;
use crate::error::{ForecastError, Result};
use crate::models::{DatedSeries, ExogMatrix, PromotionForecaster};
use crate::plan::{PromotionPlan, PromotionScenario};
use crate::utils::future_dates;
use serde::Serialize;
use tracing::debug;

/// Forecast under a promotion plan, its no-promotion baseline and the uplift
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEvaluation {
    /// The validated plan the forecast was made with
    pub plan: PromotionPlan,
    /// Forecast with the requested promotions
    pub forecast: DatedSeries,
    /// Forecast with no promotion on any day
    pub baseline: DatedSeries,
    /// `forecast - baseline` per day
    pub uplift: DatedSeries,
}

impl ScenarioEvaluation {
    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }
}

/// Evaluate a promotion scenario over `horizon` days after the last recorded date.
///
/// The plan and history are validated before the model is called. The model
/// is always called twice, once with the plan and once with an all-zero plan,
/// and the uplift is the element-wise difference. Values are passed through
/// unrounded and uplift may be negative.
pub fn evaluate<M>(
    model: &M,
    history: &SalesHistory,
    horizon: usize,
    scenario: &PromotionScenario,
) -> Result<ScenarioEvaluation>
where
    M: PromotionForecaster + ?Sized,
{
    let plan = PromotionPlan::from_scenario(scenario, horizon)?;
    let anchor = history.last_date().ok_or(ForecastError::EmptyHistory)?;
    let dates = future_dates(anchor, horizon)?;

    debug!(
        model = model.name(),
        %anchor,
        horizon,
        promotion_days = plan.promotion_days(),
        "evaluating promotion scenario"
    );

    let promoted = run_model(model, horizon, &plan.to_exog())?;
    let unpromoted = run_model(model, horizon, &ExogMatrix::zeros(horizon, 1))?;

    let uplift = promoted
        .iter()
        .zip(&unpromoted)
        .map(|(p, b)| p - b)
        .collect();

    Ok(ScenarioEvaluation {
        plan,
        forecast: DatedSeries::new(&dates, promoted)?,
        baseline: DatedSeries::new(&dates, unpromoted)?,
        uplift: DatedSeries::new(&dates, uplift)?,
    })
}

/// Call the model, turning any failure or a wrong-length output into an inference error
fn run_model<M>(model: &M, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>>
where
    M: PromotionForecaster + ?Sized,
{
    let values = model.forecast(steps, exog).map_err(|e| {
        ForecastError::ModelInference(format!("{} failed: {}", model.name(), e))
    })?;

    if values.len() != steps {
        return Err(ForecastError::ModelInference(format!(
            "{} returned {} values for {} steps",
            model.name(),
            values.len(),
            steps
        )));
    }

    Ok(values)
}
