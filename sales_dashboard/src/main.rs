use anyhow::{Context, Result};
use clap::Parser;
use sales_dashboard::logging::init_tracing;
use sales_dashboard::{load_config, Cli, Report};
use sales_forecast::data::{DataLoader, LoaderOptions};
use sales_forecast::evaluator::evaluate;
use sales_forecast::export::write_forecast_csv;
use sales_forecast::models::arimax::RegressionArmaModel;
use sales_forecast::summary::{combined_series, history_tail, ForecastKpis, HistoryKpis};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    init_tracing(&config.log_level, config.log_json);
    config.validate()?;

    let scenario = cli.scenario(&config)?;

    let loaded = DataLoader::new(LoaderOptions {
        strict: config.strict_data,
    })
    .load_csv(&config.data_path)
    .with_context(|| format!("failed to load sales data from {}", config.data_path.display()))?;

    let model = RegressionArmaModel::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;

    let evaluation = evaluate(&model, &loaded.history, config.horizon, &scenario)
        .context("forecast evaluation failed")?;

    if let Some(path) = &cli.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_forecast_csv(BufWriter::new(file), &evaluation)?;
        info!(path = %path.display(), "exported forecast table");
    }

    let report = Report {
        scenario: &scenario,
        history: HistoryKpis::from_history(&loaded.history)?,
        forecast: ForecastKpis::from_evaluation(&evaluation),
        recent: history_tail(&loaded.history, config.history_window),
        combined: combined_series(&loaded.history, &evaluation.forecast, config.combined_window),
        evaluation: &evaluation,
    };

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
