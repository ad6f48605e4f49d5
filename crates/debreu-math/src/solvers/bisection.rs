//! Bisection root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half on which `f` changes
/// sign. Stops when the half-width is within `step_tolerance` and the
/// residual at the midpoint is within `residual_tolerance`.
///
/// Requires: `f(a)` and `f(b)` of opposite sign (or one of them zero).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - Other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use debreu_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut f_mid = f_lo;

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (lo + hi);
        f_mid = f(mid);
        trace!(
            "bisection iter={} x={:.12} f(x)={:.3e} width={:.3e}",
            iteration,
            mid,
            f_mid,
            hi - lo
        );

        if f_mid == 0.0 || config.is_converged(0.5 * (hi - lo), f_mid) {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_lo.signum() != f_mid.signum() {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, f_mid.abs()))
}
