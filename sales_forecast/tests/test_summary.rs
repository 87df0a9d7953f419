use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::error::{ForecastError, Result};
use sales_forecast::evaluator::evaluate;
use sales_forecast::export::{to_json, write_forecast_csv};
use sales_forecast::models::{ExogMatrix, PromotionForecaster};
use sales_forecast::plan::PromotionScenario;
use sales_forecast::summary::{combined_series, history_tail, ForecastKpis, HistoryKpis};
use sales_forecast::SalesHistory;

#[derive(Debug)]
struct FlatModel;

impl PromotionForecaster for FlatModel {
    fn forecast(&self, steps: usize, exog: &ExogMatrix) -> Result<Vec<f64>> {
        Ok((0..steps).map(|h| 100.0 + 25.0 * exog.row(h)[0]).collect())
    }

    fn name(&self) -> &str {
        "flat"
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_history() -> SalesHistory {
    SalesHistory::from_sales(vec![
        (day(2023, 6, 1), 90.0),
        (day(2023, 6, 2), 110.0),
        (day(2023, 6, 3), 130.0),
        (day(2023, 6, 4), 70.0),
    ])
    .unwrap()
}

#[test]
fn test_history_kpis() {
    let kpis = HistoryKpis::from_history(&create_history()).unwrap();

    assert_eq!(kpis.last_recorded_sales, 70.0);
    assert_eq!(kpis.average_daily_sales, 100.0);

    let empty = HistoryKpis::from_history(&SalesHistory::default());
    assert!(matches!(empty, Err(ForecastError::EmptyHistory)));
}

#[test]
fn test_forecast_kpis() {
    let scenario = PromotionScenario::Custom(vec![1, 0, 1, 0]);
    let evaluation = evaluate(&FlatModel, &create_history(), 4, &scenario).unwrap();

    let kpis = ForecastKpis::from_evaluation(&evaluation);

    assert_eq!(kpis.total_forecasted_sales, 450.0);
    assert_eq!(kpis.average_forecasted_sales, 112.5);
    assert_eq!(kpis.total_promotion_boost, 50.0);
    assert_eq!(kpis.promotion_days, 2);

    let text = kpis.to_string();
    assert!(text.contains("Total Promotion Boost"));
    assert!(text.contains("50.00"));
}

#[test]
fn test_history_tail_and_combined_series() {
    let history = create_history();
    let evaluation = evaluate(&FlatModel, &history, 2, &PromotionScenario::NoPromotion).unwrap();

    let tail = history_tail(&history, 2);
    assert_eq!(tail.dates(), vec![day(2023, 6, 3), day(2023, 6, 4)]);
    assert_eq!(tail.values(), vec![130.0, 70.0]);

    let combined = combined_series(&history, &evaluation.forecast, 3);
    assert_eq!(
        combined.dates(),
        vec![
            day(2023, 6, 2),
            day(2023, 6, 3),
            day(2023, 6, 4),
            day(2023, 6, 5),
            day(2023, 6, 6),
        ]
    );
    assert_eq!(combined.values(), vec![110.0, 130.0, 70.0, 100.0, 100.0]);
}

#[test]
fn test_forecast_csv_export() {
    let scenario = PromotionScenario::Custom(vec![0, 1]);
    let evaluation = evaluate(&FlatModel, &create_history(), 2, &scenario).unwrap();

    let mut buffer = Vec::new();
    write_forecast_csv(&mut buffer, &evaluation).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(
        text,
        "date,forecast,baseline,uplift\n\
         2023-06-05,100.0,100.0,0.0\n\
         2023-06-06,125.0,100.0,25.0\n"
    );
}

#[test]
fn test_json_export() {
    let evaluation =
        evaluate(&FlatModel, &create_history(), 1, &PromotionScenario::FullPromotion).unwrap();

    let json = to_json(&evaluation).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["forecast"]["points"][0]["date"], "2023-06-05");
    assert_eq!(value["forecast"]["points"][0]["value"], 125.0);
    assert_eq!(value["uplift"]["points"][0]["value"], 25.0);
    assert_eq!(value["plan"]["indicators"][0], 1);
}
