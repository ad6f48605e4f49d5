//! Implied volatility command implementation.

use anyhow::Result;
use clap::{Args, ValueEnum};

use debreu_math::solvers::SolverConfig;
use debreu_options::black_scholes::BlackScholes;
use debreu_options::OptionKind;

use crate::cli::OutputFormat;
use crate::commands::validate_positive;
use crate::output::{print_header, print_key_values, KeyValue};

/// Option type on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Put option
    Put,
    /// Call option
    Call,
}

impl From<KindArg> for OptionKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Put => OptionKind::Put,
            KindArg::Call => OptionKind::Call,
        }
    }
}

/// Arguments for the implied-vol command.
#[derive(Args, Debug)]
pub struct ImpliedVolArgs {
    /// Option type
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Underlying price
    #[arg(short, long)]
    pub spot: f64,

    /// Strike
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Years to expiry
    #[arg(short, long)]
    pub expiry: f64,

    /// Continuously compounded rate (decimal)
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Cost of carry (decimal). Defaults to the rate.
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    pub carry: Option<f64>,

    /// Observed option price
    #[arg(short, long)]
    pub price: f64,

    /// Starting volatility for the solver (decimal)
    #[arg(long, default_value = "0.2")]
    pub guess: f64,
}

/// Execute the implied-vol command.
pub fn execute(args: ImpliedVolArgs, format: OutputFormat) -> Result<()> {
    let spot = validate_positive("spot", args.spot)?;
    let strike = validate_positive("strike", args.strike)?;
    let guess = validate_positive("guess", args.guess)?;
    let kind = OptionKind::from(args.kind);

    let params = BlackScholes::new(args.rate, guess, args.carry.unwrap_or(args.rate), args.expiry)?;
    let vol = params.implied_volatility(kind, spot, strike, args.price, guess, &SolverConfig::default())?;
    let fitted = params.with_volatility(vol);

    let opposite = match kind {
        OptionKind::Put => "Parity Call Price",
        OptionKind::Call => "Parity Put Price",
    };

    let rows = vec![
        KeyValue::from_percent("Implied Volatility", vol),
        KeyValue::from_f64("Model Price", fitted.price(kind, spot, strike), 6),
        KeyValue::from_f64("Delta", fitted.delta(kind, spot, strike), 6),
        KeyValue::from_f64("Gamma", fitted.gamma(spot, strike), 6),
        KeyValue::from_f64("Vega", fitted.vega(spot, strike), 6),
        KeyValue::from_f64(opposite, fitted.parity_price(kind, spot, strike, args.price), 6),
    ];

    match format {
        OutputFormat::Minimal => println!("{vol:.10}"),
        OutputFormat::Table => {
            print_header(&format!("Implied Volatility ({kind})"));
            print_key_values(&rows, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_key_values(&rows, format)?,
    }

    Ok(())
}
