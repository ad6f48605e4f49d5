//! Option payoffs and payoff matrices.

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Vanilla option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Right to sell at the strike.
    Put,
    /// Right to buy at the strike.
    Call,
}

impl OptionKind {
    /// Terminal payoff of one option at the given underlying level.
    #[inline]
    pub fn payoff(self, strike: f64, spot: f64) -> f64 {
        match self {
            Self::Put => (strike - spot).max(0.0),
            Self::Call => (spot - strike).max(0.0),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Put => write!(f, "put"),
            Self::Call => write!(f, "call"),
        }
    }
}

/// Builds the strikes × states matrix of terminal payoffs.
///
/// Entry `(i, j)` is the payoff of the option struck at `strikes[i]` when the
/// underlying finishes at `states[j]`. Either input may be empty, giving an
/// empty matrix.
///
/// # Example
///
/// ```rust
/// use debreu_options::{build_payoff_matrix, OptionKind};
///
/// let m = build_payoff_matrix(&[90.0, 100.0], &[80.0, 95.0], OptionKind::Put);
/// assert_eq!(m[(1, 0)], 20.0);
/// assert_eq!(m[(0, 1)], 0.0);
/// ```
pub fn build_payoff_matrix(strikes: &[f64], states: &[f64], kind: OptionKind) -> DMatrix<f64> {
    DMatrix::from_fn(strikes.len(), states.len(), |i, j| {
        kind.payoff(strikes[i], states[j])
    })
}
