//! Newton-Raphson root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and accepts `x_{n+1}`
/// once the step and `|f(x_{n+1})|` are both within tolerance.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use debreu_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        trace!("newton iter={} x={:.12} f(x)={:.3e}", iteration, x, fx);

        if fx == 0.0 {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.is_nan() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;
        fx = f(x);

        if config.is_converged(step, fx) {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

/// Newton-Raphson with a central-difference derivative.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = 1e-7;
    let df = |x: f64| (f(x + h) - f(x - h)) / (2.0 * h);

    newton_raphson(&f, df, initial_guess, config)
}
