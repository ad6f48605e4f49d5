//! Arbitrage and market-completeness checks.

use std::fmt;

use nalgebra::DMatrix;
use serde::Serialize;

use debreu_math::linear_algebra::matrix_rank;

/// True iff any state price is negative.
///
/// A negative state price means some portfolio of the quoted options pays a
/// non-negative amount in every state yet has negative cost.
pub fn has_arbitrage(state_prices: &[f64]) -> bool {
    state_prices.iter().any(|q| *q < 0.0)
}

/// True iff the payoff matrix has full rank over `total_states`.
///
/// A complete market can replicate every Arrow-Debreu security.
pub fn is_complete(payoff_matrix: &DMatrix<f64>, total_states: usize) -> bool {
    matrix_rank(payoff_matrix, None) == total_states
}

/// A state whose recovered price is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArbitrageViolation {
    /// Position in the combined state vector.
    pub index: usize,
    /// Underlying level of the state.
    pub state: f64,
    /// The negative state price.
    pub value: f64,
}

/// Every negative state price found in a solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArbitrageReport {
    /// Violations in state order.
    pub violations: Vec<ArbitrageViolation>,
}

impl ArbitrageReport {
    /// Scans paired states and state prices for negative values.
    pub fn scan(states: &[f64], state_prices: &[f64]) -> Self {
        let violations = states
            .iter()
            .zip(state_prices)
            .enumerate()
            .filter(|(_, (_, q))| **q < 0.0)
            .map(|(index, (&state, &value))| ArbitrageViolation {
                index,
                state,
                value,
            })
            .collect();
        Self { violations }
    }

    /// True if at least one violation was found.
    pub fn has_arbitrage(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Number of violating states.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True if the report is clean.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome of the completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Completeness {
    /// The payoff matrix spans every state.
    Complete,
    /// Some states cannot be replicated.
    Incomplete {
        /// Numerical rank of the payoff matrix.
        rank: usize,
        /// Number of hypothesized states.
        states: usize,
    },
}

impl Completeness {
    /// Classifies a payoff matrix.
    pub fn assess(payoff_matrix: &DMatrix<f64>, total_states: usize) -> Self {
        let rank = matrix_rank(payoff_matrix, None);
        if rank == total_states {
            Self::Complete
        } else {
            Self::Incomplete {
                rank,
                states: total_states,
            }
        }
    }

    /// True for [`Completeness::Complete`].
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Incomplete { rank, states } => {
                write!(f, "incomplete (rank {rank} of {states} states)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_arbitrage() {
        assert!(has_arbitrage(&[1.2, -1.2]));
        assert!(!has_arbitrage(&[0.0, 0.3]));
        assert!(!has_arbitrage(&[]));
    }

    #[test]
    fn test_report_lists_negative_states() {
        let report = ArbitrageReport::scan(&[80.0, 95.0, 110.0], &[0.1, -0.05, -0.2]);

        assert!(report.has_arbitrage());
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.violations[0],
            ArbitrageViolation {
                index: 1,
                state: 95.0,
                value: -0.05
            }
        );
        assert_eq!(report.violations[1].index, 2);
    }

    #[test]
    fn test_full_rank_is_complete() {
        let m = DMatrix::from_row_slice(2, 2, &[10.0, 0.0, 20.0, 5.0]);

        assert!(is_complete(&m, 2));
        assert_eq!(Completeness::assess(&m, 2), Completeness::Complete);
    }

    #[test]
    fn test_rank_deficient_is_incomplete() {
        let m = DMatrix::from_row_slice(2, 2, &[20.0, 5.0, 20.0, 5.0]);

        assert!(!is_complete(&m, 2));
        let c = Completeness::assess(&m, 2);
        assert_eq!(c, Completeness::Incomplete { rank: 1, states: 2 });
        assert_eq!(c.to_string(), "incomplete (rank 1 of 2 states)");
    }

    #[test]
    fn test_more_states_than_strikes() {
        let m = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);

        assert!(!is_complete(&m, 2));
    }
}
