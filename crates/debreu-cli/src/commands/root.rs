//! Root command implementation.
//!
//! Runs the root finders side by side on a built-in test function.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use debreu_math::solvers::{
    BisectionSolver, NewtonSolver, SecantSolver, Solver, SolverConfig, DEFAULT_MAX_ITERATIONS,
};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output};

/// Built-in test functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestFunction {
    /// x^4 - 5x^2 + 4 - 1/(1 + e^(x^3)), root near -2.07 from the defaults
    Quartic,
    /// x^2 - 2
    Sqrt2,
}

impl TestFunction {
    fn eval(self, x: f64) -> f64 {
        match self {
            Self::Quartic => x.powi(4) - 5.0 * x * x + 4.0 - 1.0 / (1.0 + (x * x * x).exp()),
            Self::Sqrt2 => x * x - 2.0,
        }
    }

    fn derivative(self, x: f64) -> f64 {
        match self {
            Self::Quartic => {
                let e = (x * x * x).exp();
                4.0 * x * x * x - 10.0 * x + 3.0 * x * x * e / (1.0 + e).powi(2)
            }
            Self::Sqrt2 => 2.0 * x,
        }
    }

    fn default_bracket(self) -> (f64, f64) {
        match self {
            Self::Quartic => (-3.0, -1.5),
            Self::Sqrt2 => (1.0, 2.0),
        }
    }
}

/// Root-finding method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Interval halving
    Bisection,
    /// Newton-Raphson with the analytic derivative
    Newton,
    /// Secant through the last two iterates
    Secant,
    /// All of the above
    All,
}

/// Arguments for the root command.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Function to solve
    #[arg(long, value_enum, default_value = "quartic")]
    pub function: TestFunction,

    /// Method to run
    #[arg(short, long, value_enum, default_value = "all")]
    pub method: Method,

    /// Starting point for Newton and secant. Defaults to the bracket's lower end.
    #[arg(short, long, allow_negative_numbers = true)]
    pub guess: Option<f64>,

    /// Lower end of the bisection bracket
    #[arg(long, allow_negative_numbers = true, requires = "upper")]
    pub lower: Option<f64>,

    /// Upper end of the bisection bracket
    #[arg(long, allow_negative_numbers = true, requires = "lower")]
    pub upper: Option<f64>,

    /// Step and residual tolerance
    #[arg(short, long, default_value = "1e-10")]
    pub tolerance: f64,

    /// Iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: u32,
}

/// Outcome of one solver run.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RootRow {
    #[tabled(rename = "Method")]
    pub method: &'static str,
    #[tabled(rename = "Root", display_with = "fmt_root")]
    pub root: f64,
    #[tabled(rename = "f(root)", display_with = "fmt_residual")]
    pub residual: f64,
    #[tabled(rename = "Iterations")]
    pub iterations: u32,
}

fn fmt_root(v: &f64) -> String {
    format!("{v:.12}")
}

fn fmt_residual(v: &f64) -> String {
    format!("{v:.3e}")
}

fn run<S: Solver>(
    solver: &S,
    function: TestFunction,
    guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> Result<RootRow> {
    let result = solver.solve(
        |x: f64| function.eval(x),
        Some(|x: f64| function.derivative(x)),
        guess,
        bounds,
        config,
    )?;
    info!(
        "{} converged in {} iterations",
        solver.name(),
        result.iterations
    );
    Ok(RootRow {
        method: solver.name(),
        root: result.root,
        residual: result.residual,
        iterations: result.iterations,
    })
}

/// Execute the root command.
pub fn execute(args: RootArgs, format: OutputFormat) -> Result<()> {
    let config = SolverConfig::new(args.tolerance, args.max_iterations);
    let bracket = match (args.lower, args.upper) {
        (Some(a), Some(b)) => (a, b),
        _ => args.function.default_bracket(),
    };
    let guess = args.guess.unwrap_or(bracket.0);

    let mut rows = Vec::new();
    if matches!(args.method, Method::Bisection | Method::All) {
        rows.push(run(&BisectionSolver, args.function, guess, Some(bracket), &config)?);
    }
    if matches!(args.method, Method::Newton | Method::All) {
        rows.push(run(&NewtonSolver, args.function, guess, None, &config)?);
    }
    if matches!(args.method, Method::Secant | Method::All) {
        rows.push(run(&SecantSolver, args.function, guess, None, &config)?);
    }

    match format {
        OutputFormat::Table => {
            print_header("Root Finders");
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", fmt_root(&row.root));
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
    }

    Ok(())
}
