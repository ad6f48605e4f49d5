//! Evaluate command implementation.
//!
//! Prices the held-out quotes of a scenario off the solved state prices and
//! reports relative errors.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use debreu_options::{model_mae, model_rmse, ErrorMetric, OptionKind};

use crate::cli::OutputFormat;
use crate::config::ScenarioConfig;
use crate::output::{print_header, print_json_value, print_key_values, print_output, KeyValue};

/// Error metric choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Relative root-mean-square error
    Rmse,
    /// Relative mean absolute error
    Mae,
}

impl From<MetricArg> for ErrorMetric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Rmse => ErrorMetric::Rmse,
            MetricArg::Mae => ErrorMetric::Mae,
        }
    }
}

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Scenario file (TOML) with an [evaluation] section
    pub scenario: PathBuf,

    /// Metric for minimal output. Defaults to the scenario's metric.
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,
}

/// Model and market price of one held-out quote.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PricingRow {
    #[tabled(rename = "Type")]
    pub kind: OptionKind,
    #[tabled(rename = "Strike")]
    pub strike: f64,
    #[tabled(rename = "Market", display_with = "fmt4")]
    pub market: f64,
    #[tabled(rename = "Model", display_with = "fmt4")]
    pub model: f64,
    #[tabled(rename = "Rel. Error", display_with = "fmt_pct")]
    pub relative_error: f64,
}

fn fmt4(v: &f64) -> String {
    format!("{v:.4}")
}

fn fmt_pct(v: &f64) -> String {
    format!("{:+.2}%", v * 100.0)
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    quotes: &'a [PricingRow],
    mae: f64,
    rmse: f64,
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, format: OutputFormat) -> Result<()> {
    let scenario = ScenarioConfig::from_file(&args.scenario)?;
    let model = scenario.build_model()?;
    let (puts, calls, scenario_metric) = scenario.evaluation_quotes()?;
    let metric = args.metric.map_or(scenario_metric, ErrorMetric::from);

    let approximations = model.approximate_prices(&puts.strikes(), &calls.strikes())?;
    let market: Vec<f64> = puts.prices().into_iter().chain(calls.prices()).collect();

    let mae = model_mae(&approximations, &market)?;
    let rmse = model_rmse(&approximations, &market)?;

    let kinds = std::iter::repeat(OptionKind::Put)
        .take(puts.len())
        .chain(std::iter::repeat(OptionKind::Call).take(calls.len()));
    let strikes = puts.iter().chain(calls.iter()).map(|q| q.strike);
    let rows: Vec<PricingRow> = kinds
        .zip(strikes)
        .zip(approximations.iter().zip(&market))
        .map(|((kind, strike), (&model, &market))| PricingRow {
            kind,
            strike,
            market,
            model,
            relative_error: (model - market) / market,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Held-out Quotes");
            print_output(&rows, format)?;
            print_header("Model Error");
            print_key_values(
                &[
                    KeyValue::from_percent("Relative MAE", mae),
                    KeyValue::from_percent("Relative RMSE", rmse),
                ],
                format,
            )?;
        }
        OutputFormat::Json => print_json_value(&EvaluationReport {
            quotes: &rows,
            mae,
            rmse,
        })?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            let value = match metric {
                ErrorMetric::Mae => mae,
                ErrorMetric::Rmse => rmse,
            };
            println!("{value:.10}");
        }
    }

    Ok(())
}
