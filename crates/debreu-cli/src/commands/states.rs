//! States command implementation.
//!
//! Solves a scenario for its state prices and reports arbitrage and
//! completeness, or sweeps the scenario's candidate endpoint states.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use debreu_options::{ArbitrageReport, Completeness, EndpointOutcome, OptionKind};

use crate::cli::OutputFormat;
use crate::config::ScenarioConfig;
use crate::output::{
    print_header, print_json_value, print_key_values, print_output, print_warning, KeyValue,
};

/// Arguments for the states command.
#[derive(Args, Debug)]
pub struct StatesArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Re-solve for every pair of [sweep] endpoints instead
    #[arg(long)]
    pub sweep: bool,
}

/// One solved state.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StateRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Block")]
    pub block: OptionKind,
    #[tabled(rename = "State")]
    pub state: f64,
    #[tabled(rename = "State Price")]
    pub price: f64,
}

#[derive(Serialize)]
struct StatesReport<'a> {
    states: &'a [StateRow],
    discount_factor: f64,
    arbitrage: ArbitrageReport,
    completeness: Completeness,
}

/// Arbitrage summary for one endpoint pair.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SweepRow {
    #[tabled(rename = "Low")]
    pub low: f64,
    #[tabled(rename = "High")]
    pub high: f64,
    #[tabled(rename = "Sum of State Prices", display_with = "fmt6")]
    pub total: f64,
    #[tabled(rename = "Negative States")]
    pub negative: usize,
    #[tabled(rename = "Arbitrage")]
    pub arbitrage: bool,
}

fn fmt6(v: &f64) -> String {
    format!("{v:.6}")
}

impl From<&EndpointOutcome> for SweepRow {
    fn from(o: &EndpointOutcome) -> Self {
        Self {
            low: o.low,
            high: o.high,
            total: o.state_prices.total(),
            negative: o.arbitrage.len(),
            arbitrage: o.has_arbitrage(),
        }
    }
}

/// Execute the states command.
pub fn execute(args: StatesArgs, format: OutputFormat) -> Result<()> {
    let scenario = ScenarioConfig::from_file(&args.scenario)?;
    if args.sweep {
        return execute_sweep(&scenario, format);
    }

    let model = scenario.build_model()?;

    let q = model.state_prices()?;
    let arbitrage = model.arbitrage_report()?;
    let completeness = model.completeness();

    let put_count = model.states().put_states.len();
    let rows: Vec<StateRow> = model
        .states()
        .combined()
        .into_iter()
        .zip(q.iter())
        .enumerate()
        .map(|(index, (state, &price))| StateRow {
            index,
            block: if index < put_count {
                OptionKind::Put
            } else {
                OptionKind::Call
            },
            state,
            price,
        })
        .collect();

    if arbitrage.has_arbitrage() {
        warn!("{} negative state prices", arbitrage.len());
    }

    match format {
        OutputFormat::Table => {
            print_header("State Prices");
            print_output(&rows, format)?;

            let mut summary = vec![
                KeyValue::new("States", rows.len().to_string()),
                KeyValue::from_f64("Sum of State Prices", q.total(), 6),
                KeyValue::new("Market", completeness.to_string()),
            ];
            summary.push(if arbitrage.has_arbitrage() {
                KeyValue::new(
                    "Arbitrage",
                    format!("{} negative state prices", arbitrage.len()).red().to_string(),
                )
            } else {
                KeyValue::new("Arbitrage", "none".green().to_string())
            });
            print_header("Summary");
            print_key_values(&summary, format)?;

            for v in &arbitrage.violations {
                print_warning(&format!(
                    "state {} at level {} has price {:.6}",
                    v.index, v.state, v.value
                ));
            }
        }
        OutputFormat::Json => {
            print_json_value(&StatesReport {
                states: &rows,
                discount_factor: q.total(),
                arbitrage,
                completeness,
            })?;
        }
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            let values: Vec<String> = q.iter().map(|v| format!("{v:.10}")).collect();
            println!("{}", values.join(","));
        }
    }

    Ok(())
}

fn execute_sweep(scenario: &ScenarioConfig, format: OutputFormat) -> Result<()> {
    let outcomes = scenario.endpoint_sweep()?;
    let rows: Vec<SweepRow> = outcomes.iter().map(SweepRow::from).collect();

    let clean = rows.iter().filter(|r| !r.arbitrage).count();
    if clean == 0 {
        warn!("every endpoint pair admits arbitrage");
    }

    match format {
        OutputFormat::Table => {
            print_header("Endpoint Sweep");
            print_output(&rows, format)?;
            print_key_values(
                &[
                    KeyValue::new("Pairs", rows.len().to_string()),
                    KeyValue::new("Arbitrage-free", clean.to_string()),
                ],
                format,
            )?;
        }
        OutputFormat::Json => print_json_value(&outcomes)?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{},{},{}", row.low, row.high, row.arbitrage);
            }
        }
    }

    Ok(())
}
