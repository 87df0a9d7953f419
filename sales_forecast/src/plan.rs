//! Promotion scenarios and the validated per-day promotion plan

use crate::error::{ForecastError, Result};
use crate::models::ExogMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A promotion scenario as requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionScenario {
    /// No promotion on any future day (token `none`)
    #[serde(rename = "none")]
    NoPromotion,
    /// Promotion on every future day (token `full`)
    #[serde(rename = "full")]
    FullPromotion,
    /// Explicit per-day indicators, validated against the horizon
    Custom(Vec<i64>),
}

impl PromotionScenario {
    /// Expand into a validated plan for `horizon` days
    pub fn expand(&self, horizon: usize) -> Result<PromotionPlan> {
        PromotionPlan::from_scenario(self, horizon)
    }
}

impl FromStr for PromotionScenario {
    type Err = ForecastError;

    /// Parse `none`, `full` or a comma separated list such as `0,1,1,0`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no-promotion" | "no_promotion" => Ok(Self::NoPromotion),
            "full" | "full-promotion" | "full_promotion" => Ok(Self::FullPromotion),
            "" => Err(ForecastError::InvalidPlan(
                "empty promotion scenario".to_string(),
            )),
            list => list
                .split(',')
                .map(|entry| {
                    entry.trim().parse::<i64>().map_err(|_| {
                        ForecastError::InvalidPlan(format!(
                            "plan entry '{}' is not an integer",
                            entry.trim()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Custom),
        }
    }
}

impl fmt::Display for PromotionScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPromotion => write!(f, "No Promotion"),
            Self::FullPromotion => write!(f, "Full Promotion"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Binary promotion indicators, one per future day in calendar order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionPlan {
    indicators: Vec<u8>,
}

impl PromotionPlan {
    /// Plan with no promotion on any of the `horizon` days
    pub fn zeros(horizon: usize) -> Self {
        Self {
            indicators: vec![0; horizon],
        }
    }

    /// Plan with a promotion on every one of the `horizon` days
    pub fn ones(horizon: usize) -> Self {
        Self {
            indicators: vec![1; horizon],
        }
    }

    /// Validate a scenario against the horizon.
    ///
    /// The horizon must be positive. Custom entries must number exactly
    /// `horizon` and each be 0 or 1.
    pub fn from_scenario(scenario: &PromotionScenario, horizon: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be positive".to_string(),
            ));
        }

        match scenario {
            PromotionScenario::NoPromotion => Ok(Self::zeros(horizon)),
            PromotionScenario::FullPromotion => Ok(Self::ones(horizon)),
            PromotionScenario::Custom(entries) => {
                if entries.len() != horizon {
                    return Err(ForecastError::InvalidPlan(format!(
                        "Plan length ({}) doesn't match horizon ({})",
                        entries.len(),
                        horizon
                    )));
                }

                let indicators = entries
                    .iter()
                    .enumerate()
                    .map(|(day, &entry)| match entry {
                        0 => Ok(0),
                        1 => Ok(1),
                        other => Err(ForecastError::InvalidPlan(format!(
                            "Day {} has non-binary entry {}",
                            day + 1,
                            other
                        ))),
                    })
                    .collect::<Result<Vec<u8>>>()?;

                Ok(Self { indicators })
            }
        }
    }

    /// Get the indicators
    pub fn indicators(&self) -> &[u8] {
        &self.indicators
    }

    /// Number of days in the plan
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Check if the plan is empty
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Number of promoted days
    pub fn promotion_days(&self) -> usize {
        self.indicators.iter().filter(|&&d| d == 1).count()
    }

    /// Single-column exogenous matrix for the model
    pub fn to_exog(&self) -> ExogMatrix {
        ExogMatrix::column(self.indicators.iter().map(|&d| f64::from(d)).collect())
    }
}
