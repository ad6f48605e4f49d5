//! Secant root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Secant root-finding algorithm.
///
/// Newton's iteration with the derivative replaced by the slope through the
/// two most recent iterates. Superlinear convergence (order ~1.618) without a
/// derivative or a bracket.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use debreu_math::solvers::{secant, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = f(x_prev);
    let mut f_curr = f(x_curr);

    for iteration in 0..config.max_iterations {
        trace!("secant iter={} x={:.12} f(x)={:.3e}", iteration, x_curr, f_curr);

        if f_curr == 0.0 {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let denom = f_curr - f_prev;
        if denom.is_nan() || denom.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        let f_next = f(x_next);

        if config.is_converged(x_next - x_curr, f_next) {
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f_next,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
    }

    Err(MathError::convergence_failed(config.max_iterations, f_curr.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        let f = |x: f64| x.sin();

        let result = secant(f, 3.0, 3.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_convergence_speed() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert!(result.iterations < 15);
    }

    #[test]
    fn test_flat_secant() {
        // Symmetric points on an even function give a horizontal secant
        let f = |x: f64| x * x + 1.0;

        let result = secant(f, -1.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }
}
