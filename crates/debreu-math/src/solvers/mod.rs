//! Root-finding algorithms.
//!
//! - [`bisection`]: bracketing method, always converges on a sign change
//! - [`newton_raphson`]: quadratic convergence when a derivative is available
//! - [`secant`]: derivative-free, needs two starting points
//!
//! All three share one stopping rule: an iterate is accepted only when the
//! last step (or half-bracket) is within `step_tolerance` **and** the residual
//! `|f(x)|` is within `residual_tolerance`. An exact zero of `f` is accepted
//! immediately.
//!
//! # Example: yield of a continuously compounded zero
//!
//! ```rust
//! use debreu_math::solvers::{newton_raphson, SolverConfig};
//!
//! // 100 paid in 2 years, priced at 90
//! let f = |y: f64| 100.0 * (-2.0 * y).exp() - 90.0;
//! let df = |y: f64| -200.0 * (-2.0 * y).exp();
//!
//! let result = newton_raphson(f, df, 0.05, &SolverConfig::default()).unwrap();
//! assert!((result.root - (100.0_f64 / 90.0).ln() / 2.0).abs() < 1e-10);
//! ```

mod bisection;
mod newton;
mod secant;

pub use bisection::bisection;
pub use newton::{newton_raphson, newton_raphson_numerical};
pub use secant::secant;

use crate::error::MathResult;

/// Default tolerance on consecutive iterates.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-10;

/// Default tolerance on `|f(x)|` at the accepted root.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives smaller than this are treated as zero.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Largest admissible distance between consecutive iterates.
    pub step_tolerance: f64,
    /// Largest admissible `|f(x)|` at the accepted root.
    pub residual_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration using one tolerance for both criteria.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            step_tolerance: tolerance,
            residual_tolerance: tolerance,
            max_iterations,
        }
    }

    /// Sets both tolerances.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self.residual_tolerance = tolerance;
        self
    }

    /// Sets the step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, tolerance: f64) -> Self {
        self.step_tolerance = tolerance;
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_residual_tolerance(mut self, tolerance: f64) -> Self {
        self.residual_tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns true when both stopping criteria hold.
    pub fn is_converged(&self, step: f64, residual: f64) -> bool {
        step.abs() <= self.step_tolerance && residual.abs() <= self.residual_tolerance
    }
}

/// Uniform interface over the root finders.
///
/// Solvers ignore the inputs they have no use for: bisection ignores the
/// derivative, Newton ignores the bounds.
///
/// # Example
///
/// ```rust
/// use debreu_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of `f`.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `derivative` - Optional derivative function (used if available)
    /// * `initial_guess` - Starting point for the search
    /// * `bounds` - Optional bracketing interval (a, b)
    /// * `config` - Solver configuration
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Newton-Raphson solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        _bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton_raphson(f, df, initial_guess, config),
            None => newton_raphson_numerical(f, initial_guess, config),
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Secant method solver implementation.
///
/// When bounds are given they are used as the two starting points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl Solver for SecantSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (x0, x1) = bounds.unwrap_or((initial_guess - 0.01, initial_guess));
        secant(f, x0, x1, config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
