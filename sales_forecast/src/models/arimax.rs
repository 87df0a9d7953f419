//! Linear regression with ARMA errors, loaded from a pre-fit parameter file

use crate::error::{ForecastError, Result};
use crate::models::{ExogMatrix, PromotionForecaster};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

fn default_name() -> String {
    "Regression with ARMA errors".to_string()
}

/// Pre-fit regression on exogenous inputs with ARMA(p, q) errors.
///
/// Forecast for step `h` (1-based):
///
/// ```text
/// y[h] = intercept + trend * (trend_origin + h)
///      + seasonal[(seasonal_offset + h - 1) % m]
///      + sum_k beta[k] * x[h - 1][k]
///      + eta[h]
/// ```
///
/// where `eta` continues the ARMA error process from `recent_errors` and
/// `recent_innovations` (most recent last). Future innovations are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionArmaModel {
    /// Name of the model
    #[serde(default = "default_name")]
    name: String,
    /// Constant term
    intercept: f64,
    /// Linear trend per step
    #[serde(default)]
    trend: f64,
    /// Number of observations the model was fit on
    #[serde(default)]
    trend_origin: usize,
    /// Additive seasonal pattern, empty when the model has no seasonality
    #[serde(default)]
    seasonal: Vec<f64>,
    /// Position in the seasonal pattern of the first forecast step
    #[serde(default)]
    seasonal_offset: usize,
    /// One coefficient per exogenous column
    exog_coefficients: Vec<f64>,
    /// AR coefficients (phi_1..phi_p)
    #[serde(default)]
    ar_coefficients: Vec<f64>,
    /// MA coefficients (theta_1..theta_q)
    #[serde(default)]
    ma_coefficients: Vec<f64>,
    /// Last regression errors at the end of the sample
    #[serde(default)]
    recent_errors: Vec<f64>,
    /// Last one-step innovations at the end of the sample
    #[serde(default)]
    recent_innovations: Vec<f64>,
}

impl RegressionArmaModel {
    /// Create a model with no trend, seasonality or error dynamics
    pub fn new(intercept: f64, exog_coefficients: Vec<f64>) -> Result<Self> {
        let model = Self {
            name: default_name(),
            intercept,
            trend: 0.0,
            trend_origin: 0,
            seasonal: Vec::new(),
            seasonal_offset: 0,
            exog_coefficients,
            ar_coefficients: Vec::new(),
            ma_coefficients: Vec::new(),
            recent_errors: Vec::new(),
            recent_innovations: Vec::new(),
        };
        model.validate()?;
        Ok(model)
    }

    /// Set the model name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a linear trend continuing from `trend_origin` observations
    pub fn with_trend(mut self, trend: f64, trend_origin: usize) -> Result<Self> {
        self.trend = trend;
        self.trend_origin = trend_origin;
        self.validate()?;
        Ok(self)
    }

    /// Add an additive seasonal pattern
    pub fn with_seasonal(mut self, pattern: Vec<f64>, offset: usize) -> Result<Self> {
        self.seasonal = pattern;
        self.seasonal_offset = offset;
        self.validate()?;
        Ok(self)
    }

    /// Add ARMA error dynamics and the end-of-sample state they continue from
    pub fn with_arma(
        mut self,
        ar_coefficients: Vec<f64>,
        ma_coefficients: Vec<f64>,
        recent_errors: Vec<f64>,
        recent_innovations: Vec<f64>,
    ) -> Result<Self> {
        self.ar_coefficients = ar_coefficients;
        self.ma_coefficients = ma_coefficients;
        self.recent_errors = recent_errors;
        self.recent_innovations = recent_innovations;
        self.validate()?;
        Ok(self)
    }

    /// Parse and validate a model from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a pre-fit model from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let model = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), model = %model.name, "loaded model");
        Ok(model)
    }

    /// Save the model parameters as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Number of exogenous columns the model expects
    pub fn exog_columns(&self) -> usize {
        self.exog_coefficients.len()
    }

    fn validate(&self) -> Result<()> {
        let scalars = [self.intercept, self.trend];
        let all_finite = scalars
            .iter()
            .chain(&self.seasonal)
            .chain(&self.exog_coefficients)
            .chain(&self.ar_coefficients)
            .chain(&self.ma_coefficients)
            .chain(&self.recent_errors)
            .chain(&self.recent_innovations)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ForecastError::InvalidParameter(
                "Model parameters must be finite".to_string(),
            ));
        }

        if self.recent_errors.len() < self.ar_coefficients.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "AR order {} needs at least {} recent errors, got {}",
                self.ar_coefficients.len(),
                self.ar_coefficients.len(),
                self.recent_errors.len()
            )));
        }

        if self.recent_innovations.len() < self.ma_coefficients.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "MA order {} needs at least {} recent innovations, got {}",
                self.ma_coefficients.len(),
                self.ma_coefficients.len(),
                self.recent_innovations.len()
            )));
        }

        Ok(())
    }

    /// Continue the ARMA error process `steps` periods ahead
    fn forecast_errors(&self, steps: usize) -> Vec<f64> {
        let p = self.ar_coefficients.len();
        let q = self.ma_coefficients.len();

        let mut history = self.recent_errors[self.recent_errors.len() - p..].to_vec();
        let innovations = &self.recent_innovations[self.recent_innovations.len() - q..];
        let mut forecasts = Vec::with_capacity(steps);

        for h in 0..steps {
            let mut eta = 0.0;
            for (i, phi) in self.ar_coefficients.iter().enumerate() {
                eta += phi * history[history.len() - 1 - i];
            }
            // Only innovations observed before the forecast origin contribute
            for (j, theta) in self.ma_coefficients.iter().enumerate().skip(h) {
                eta += theta * innovations[q - 1 - (j - h)];
            }

            history.push(eta);
            forecasts.push(eta);
        }

        forecasts
    }
}

impl PromotionForecaster for RegressionArmaModel {
    fn forecast(&self, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>> {
        if exog.rows() != steps {
            return Err(ForecastError::InvalidParameter(format!(
                "Exogenous rows ({}) don't match steps ({})",
                exog.rows(),
                steps
            )));
        }
        if exog.cols() != self.exog_coefficients.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Exogenous columns ({}) don't match model coefficients ({})",
                exog.cols(),
                self.exog_coefficients.len()
            )));
        }

        let errors = self.forecast_errors(steps);
        let values = (0..steps)
            .map(|h| {
                let mut value = self.intercept + self.trend * (self.trend_origin + h + 1) as f64;
                if !self.seasonal.is_empty() {
                    value += self.seasonal[(self.seasonal_offset + h) % self.seasonal.len()];
                }
                value += exog
                    .row(h)
                    .iter()
                    .zip(&self.exog_coefficients)
                    .map(|(x, beta)| x * beta)
                    .sum::<f64>();
                value + errors[h]
            })
            .collect();

        Ok(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
