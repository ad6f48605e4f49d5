//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{BondArgs, EvaluateArgs, ImpliedVolArgs, RootArgs, StatesArgs};

/// Debreu - Arrow-Debreu state prices and fixed income numerics
#[derive(Parser)]
#[command(name = "debreu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Recover state prices from a scenario file
    States(StatesArgs),

    /// Score the state-price model against held-out quotes
    Evaluate(EvaluateArgs),

    /// Bond price, yield, duration and convexity
    Bond(BondArgs),

    /// Black-Scholes implied volatility and greeks
    ImpliedVol(ImpliedVolArgs),

    /// Run the root finders on a built-in test function
    Root(RootArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}
