//! Bond command implementation.
//!
//! Continuously compounded yield, duration and convexity of a fixed-coupon
//! bond, with the duration/convexity price-change approximation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use debreu_bonds::{Bond, BondAnalytics, CouponSchedule};
use debreu_math::solvers::SolverConfig;

use crate::cli::OutputFormat;
use crate::commands::{validate_percent, validate_positive};
use crate::error::CliError;
use crate::output::{print_header, print_json_value, print_key_values, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Years to maturity
    #[arg(short, long)]
    pub maturity: f64,

    /// Years between coupons (0.5 for semi-annual)
    #[arg(short, long, default_value = "0.5")]
    pub period: f64,

    /// Annual coupon rate (as percentage, e.g., 8.0 for 8%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Price per 100 face; the yield is solved for
    #[arg(long, conflicts_with = "yield_value")]
    pub price: Option<f64>,

    /// Continuously compounded yield (as percentage)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_value: Option<f64>,

    /// Yield shift in basis points for the price-change estimate
    #[arg(long, allow_negative_numbers = true)]
    pub shift: Option<f64>,

    /// Starting yield for the solver (as percentage)
    #[arg(long, default_value = "10")]
    pub guess: f64,

    /// Show cash flows
    #[arg(long)]
    pub cashflows: bool,
}

#[derive(Serialize)]
struct BondReport {
    #[serde(flatten)]
    analytics: BondAnalytics,
    #[serde(skip_serializing_if = "Option::is_none")]
    shift: Option<ShiftEstimate>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct ShiftEstimate {
    shift_bps: f64,
    duration_estimate: f64,
    duration_convexity_estimate: f64,
    exact: f64,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, format: OutputFormat) -> Result<()> {
    let maturity = validate_positive("maturity", args.maturity)?;
    let period = validate_positive("coupon period", args.period)?;
    let coupon = validate_percent("coupon", args.coupon)?;

    let bond = Bond::new(CouponSchedule::new(maturity, period, coupon / 100.0)?);

    let analytics = if let Some(price) = args.price {
        validate_positive("price", price)?;
        let guess = validate_percent("guess", args.guess)? / 100.0;
        BondAnalytics::from_price(&bond, price, guess, &SolverConfig::default())?
    } else if let Some(y) = args.yield_value {
        BondAnalytics::from_yield(&bond, validate_percent("yield", y)? / 100.0)
    } else {
        return Err(CliError::MissingArgument("--price or --yield".into()).into());
    };

    let shift = args.shift.map(|bps| {
        let dy = bps / 10_000.0;
        ShiftEstimate {
            shift_bps: bps,
            duration_estimate: analytics.price_change_first_order(dy),
            duration_convexity_estimate: analytics.price_change(dy),
            exact: bond.price_from_yield(analytics.yield_value + dy) / analytics.price - 1.0,
        }
    });

    match format {
        OutputFormat::Json => print_json_value(&BondReport { analytics, shift })?,
        OutputFormat::Minimal => {
            println!(
                "Yield: {:.6}%, Duration: {:.6}, Convexity: {:.6}",
                analytics.yield_value * 100.0,
                analytics.duration,
                analytics.convexity
            );
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = vec![
                KeyValue::new("Maturity", format!("{maturity}y")),
                KeyValue::new("Coupon", format!("{coupon}% every {period}y")),
                KeyValue::from_percent("Yield", analytics.yield_value),
                KeyValue::from_f64("Price", analytics.price, 6),
                KeyValue::from_f64("Duration", analytics.duration, 6),
                KeyValue::from_f64("Convexity", analytics.convexity, 6),
            ];
            if let Some(s) = shift {
                rows.push(KeyValue::new("Shift", format!("{} bps", s.shift_bps)));
                rows.push(KeyValue::from_percent("ΔB/B (duration)", s.duration_estimate));
                rows.push(KeyValue::from_percent(
                    "ΔB/B (duration + convexity)",
                    s.duration_convexity_estimate,
                ));
                rows.push(KeyValue::from_percent("ΔB/B (exact)", s.exact));
            }

            if format == OutputFormat::Table {
                print_header("Bond Analytics");
            }
            print_key_values(&rows, format)?;

            if args.cashflows && format == OutputFormat::Table {
                print_cashflows(&bond);
            }
        }
    }

    Ok(())
}

/// Print cash-flow schedule.
fn print_cashflows(bond: &Bond) {
    #[derive(Tabled)]
    struct CashflowRow {
        #[tabled(rename = "Time (y)")]
        time: String,
        #[tabled(rename = "Amount")]
        amount: String,
    }

    let rows: Vec<CashflowRow> = bond
        .schedule()
        .cash_flows()
        .iter()
        .map(|cf| CashflowRow {
            time: format!("{:.4}", cf.time),
            amount: format!("{:.4}", cf.amount),
        })
        .collect();

    print_header("Cash Flows");
    println!("{}", Table::new(&rows).with(Style::rounded()));
}
