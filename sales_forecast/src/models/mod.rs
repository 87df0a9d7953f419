//! Forecasting model capability and the dated series it produces

use crate::error::{ForecastError, Result};
use crate::utils;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Row-major matrix of exogenous regressors, one row per forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExogMatrix")]
pub struct ExogMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawExogMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawExogMatrix> for ExogMatrix {
    type Error = ForecastError;

    fn try_from(raw: RawExogMatrix) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.data)
    }
}

impl ExogMatrix {
    /// Create a matrix from row-major values
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Exogenous data length ({}) doesn't match shape ({}, {})",
                data.len(),
                rows,
                cols
            )));
        }

        Ok(Self { rows, cols, data })
    }

    /// A single-column matrix
    pub fn column(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// A `rows × cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Regressors for one forecast step
    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }
}

/// A single forecasted (or derived) value on a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Values aligned to consecutive calendar days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedSeries {
    points: Vec<DatedValue>,
}

impl DatedSeries {
    /// Zip dates with values; both must have the same length
    pub fn new(dates: &[NaiveDate], values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match dates length ({})",
                values.len(),
                dates.len()
            )));
        }

        Ok(Self {
            points: dates
                .iter()
                .zip(values)
                .map(|(&date, value)| DatedValue { date, value })
                .collect(),
        })
    }

    /// Build a series from points as they are
    pub fn from_points(points: Vec<DatedValue>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DatedValue] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        utils::total(&self.values())
    }

    /// Mean of all values, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        utils::mean(&self.values())
    }
}

/// A pre-fit model that forecasts future values given exogenous regressors.
///
/// Implementations are treated as black boxes: the caller only relies on
/// `forecast` returning `steps` values for a `steps × k` exogenous matrix.
pub trait PromotionForecaster: Debug {
    /// Forecast `steps` future values
    fn forecast(&self, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

impl<T: PromotionForecaster + ?Sized> PromotionForecaster for &T {
    fn forecast(&self, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>> {
        (**self).forecast(steps, exog)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: PromotionForecaster + ?Sized> PromotionForecaster for Box<T> {
    fn forecast(&self, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>> {
        (**self).forecast(steps, exog)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub mod arimax;
