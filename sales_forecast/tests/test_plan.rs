use rstest::rstest;
use sales_forecast::error::ForecastError;
use sales_forecast::models::arimax::RegressionArmaModel;
use sales_forecast::models::{ExogMatrix, PromotionForecaster};
use sales_forecast::plan::{PromotionPlan, PromotionScenario};

#[rstest]
#[case("none", PromotionScenario::NoPromotion)]
#[case("None", PromotionScenario::NoPromotion)]
#[case("no-promotion", PromotionScenario::NoPromotion)]
#[case("full", PromotionScenario::FullPromotion)]
#[case(" FULL ", PromotionScenario::FullPromotion)]
#[case("0,1,1,0", PromotionScenario::Custom(vec![0, 1, 1, 0]))]
#[case("1, 0, 2", PromotionScenario::Custom(vec![1, 0, 2]))]
fn test_scenario_parsing(#[case] input: &str, #[case] expected: PromotionScenario) {
    assert_eq!(input.parse::<PromotionScenario>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("sometimes")]
#[case("0,1,x")]
#[case("0.5,1")]
fn test_scenario_parsing_errors(#[case] input: &str) {
    let result = input.parse::<PromotionScenario>();
    assert!(matches!(result, Err(ForecastError::InvalidPlan(_))));
}

#[test]
fn test_token_expansion() {
    let none = PromotionScenario::NoPromotion.expand(5).unwrap();
    assert_eq!(none.indicators(), &[0, 0, 0, 0, 0]);
    assert_eq!(none.promotion_days(), 0);

    let full = PromotionScenario::FullPromotion.expand(5).unwrap();
    assert_eq!(full.indicators(), &[1, 1, 1, 1, 1]);
    assert_eq!(full.promotion_days(), 5);
}

#[test]
fn test_custom_plan_validation() {
    let plan = PromotionPlan::from_scenario(&PromotionScenario::Custom(vec![0, 1, 1]), 3).unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.promotion_days(), 2);

    let too_short = PromotionPlan::from_scenario(&PromotionScenario::Custom(vec![0, 1]), 3);
    assert!(matches!(too_short, Err(ForecastError::InvalidPlan(_))));

    let too_long = PromotionPlan::from_scenario(&PromotionScenario::Custom(vec![0; 4]), 3);
    assert!(matches!(too_long, Err(ForecastError::InvalidPlan(_))));

    let non_binary = PromotionPlan::from_scenario(&PromotionScenario::Custom(vec![0, 2, 1]), 3);
    match non_binary {
        Err(ForecastError::InvalidPlan(msg)) => assert!(msg.contains("Day 2")),
        other => panic!("Expected InvalidPlan, got {:?}", other),
    }
}

#[test]
fn test_zero_horizon_is_invalid_parameter() {
    let result = PromotionScenario::NoPromotion.expand(0);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));

    let result = PromotionScenario::Custom(Vec::new()).expand(0);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_plan_to_exog_column() {
    let plan = PromotionScenario::Custom(vec![1, 0, 1]).expand(3).unwrap();
    let exog = plan.to_exog();

    assert_eq!(exog.shape(), (3, 1));
    assert_eq!(exog.row(0), &[1.0]);
    assert_eq!(exog.row(1), &[0.0]);
    assert_eq!(exog.row(2), &[1.0]);
}

#[test]
fn test_exog_matrix_shape_validation() {
    let matrix = ExogMatrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(matrix.row(1), &[3.0, 4.0]);

    let result = ExogMatrix::new(2, 2, vec![1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_exog_matrix_deserialize_checks_shape() {
    let matrix: ExogMatrix =
        serde_json::from_str(r#"{"rows":2,"cols":1,"data":[1.0,0.0]}"#).unwrap();
    assert_eq!(matrix.shape(), (2, 1));

    let result = serde_json::from_str::<ExogMatrix>(r#"{"rows":3,"cols":1,"data":[1.0]}"#);
    assert!(result.is_err());
}

#[test]
fn test_model_rejects_matrix_with_wrong_row_count() {
    let model = RegressionArmaModel::new(10.0, vec![2.0]).unwrap();
    let exog = ExogMatrix::column(vec![1.0]);

    let result = model.forecast(3, &exog);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[rstest]
#[case(PromotionScenario::NoPromotion, "\"none\"")]
#[case(PromotionScenario::FullPromotion, "\"full\"")]
fn test_scenario_serde_uses_cli_tokens(#[case] scenario: PromotionScenario, #[case] json: &str) {
    assert_eq!(serde_json::to_string(&scenario).unwrap(), json);

    let token = json.trim_matches('"');
    let parsed: PromotionScenario = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, token.parse::<PromotionScenario>().unwrap());
}

#[test]
fn test_scenario_display() {
    assert_eq!(PromotionScenario::NoPromotion.to_string(), "No Promotion");
    assert_eq!(PromotionScenario::FullPromotion.to_string(), "Full Promotion");
    assert_eq!(PromotionScenario::Custom(vec![1]).to_string(), "Custom");
}
