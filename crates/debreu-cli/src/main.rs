//! Debreu CLI - state prices, bond and option numerics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Recover state prices from a scenario file
//! debreu states scenarios/index_options.toml
//!
//! # Check every candidate pair of outermost states for arbitrage
//! debreu states scenarios/endpoint_sweep.toml --sweep
//!
//! # Score the model against held-out quotes
//! debreu evaluate scenarios/index_options.toml --format json
//!
//! # Bond yield, duration and convexity
//! debreu bond --maturity 2 --period 0.25 --coupon 8 --price 98
//!
//! # Implied volatility
//! debreu implied-vol --kind call --spot 60 --strike 65 --expiry 0.25 --rate 0.08 --price 2.1334
//!
//! # Compare root finders
//! debreu root --function quartic --method all
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);
    debug!("debreu v{}", env!("CARGO_PKG_VERSION"));

    let format = cli.format;

    match cli.command {
        Commands::States(args) => commands::states::execute(args, format)?,
        Commands::Evaluate(args) => commands::evaluate::execute(args, format)?,
        Commands::Bond(args) => commands::bond::execute(args, format)?,
        Commands::ImpliedVol(args) => commands::implied_vol::execute(args, format)?,
        Commands::Root(args) => commands::root::execute(args, format)?,
    }

    Ok(())
}

/// Installs the stderr subscriber; `log` records from the library crates are
/// forwarded into it.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn,debreu=info",
            1 => "warn,debreu=debug",
            _ => "warn,debreu=trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
