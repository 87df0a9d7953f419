//! Utility functions for the sales_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Create the `horizon` consecutive calendar days following `anchor`
pub fn future_dates(anchor: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as u64)
        .map(|offset| {
            anchor.checked_add_days(Days::new(offset)).ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Date overflow: {} + {} days is out of range",
                    anchor, offset
                ))
            })
        })
        .collect()
}

/// Sum of a slice of values
pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(total(values) / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_dates_cross_month_and_leap_day() {
        let anchor = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let dates = future_dates(anchor, 4).unwrap();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn test_future_dates_zero_horizon() {
        let anchor = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(future_dates(anchor, 0).unwrap().is_empty());
    }

    #[test]
    fn test_future_dates_overflow() {
        let result = future_dates(NaiveDate::MAX, 1);
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
