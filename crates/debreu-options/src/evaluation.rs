//! Re-pricing against solved state prices and relative error metrics.

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};
use crate::payoff::{build_payoff_matrix, OptionKind};

/// Prices arbitrary strikes off a state-price vector.
///
/// Payoffs are taken over the full `states` set (put states followed by call
/// states), so `states` and `state_prices` must have equal length. The result
/// lists put approximations then call approximations.
pub fn approximate_prices(
    put_strikes: &[f64],
    call_strikes: &[f64],
    states: &[f64],
    state_prices: &[f64],
) -> OptionsResult<Vec<f64>> {
    if states.len() != state_prices.len() {
        return Err(OptionsError::dimension_mismatch(
            "state prices",
            states.len(),
            state_prices.len(),
        ));
    }

    let q = DVector::from_column_slice(state_prices);
    let puts = build_payoff_matrix(put_strikes, states, OptionKind::Put) * &q;
    let calls = build_payoff_matrix(call_strikes, states, OptionKind::Call) * &q;

    Ok(puts.iter().chain(calls.iter()).copied().collect())
}

/// Relative root-mean-square error, `sqrt(mean(((a - t) / t)^2))`.
pub fn model_rmse(approximations: &[f64], true_values: &[f64]) -> OptionsResult<f64> {
    check_references(approximations, true_values)?;
    let sum_sq: f64 = approximations
        .iter()
        .zip(true_values)
        .map(|(a, t)| ((a - t) / t).powi(2))
        .sum();
    Ok((sum_sq / true_values.len() as f64).sqrt())
}

/// Relative mean absolute error, `mean(|a - t| / t)`.
///
/// Only the difference is taken in absolute value, so a negative reference
/// contributes a negative term.
///
/// ```rust
/// use debreu_options::model_mae;
///
/// let mae = model_mae(&[10.0, 20.0], &[10.0, 25.0]).unwrap();
/// assert!((mae - 0.1).abs() < 1e-12);
/// ```
pub fn model_mae(approximations: &[f64], true_values: &[f64]) -> OptionsResult<f64> {
    check_references(approximations, true_values)?;
    let sum: f64 = approximations
        .iter()
        .zip(true_values)
        .map(|(a, t)| (a - t).abs() / t)
        .sum();
    Ok(sum / true_values.len() as f64)
}

/// Both metrics divide by every reference value.
fn check_references(approximations: &[f64], true_values: &[f64]) -> OptionsResult<()> {
    if approximations.len() != true_values.len() {
        return Err(OptionsError::dimension_mismatch(
            "true values",
            approximations.len(),
            true_values.len(),
        ));
    }
    if true_values.is_empty() {
        return Err(OptionsError::invalid_input("no values to score"));
    }
    match true_values.iter().position(|t| *t == 0.0) {
        Some(index) => Err(OptionsError::InvalidReferenceValue { index }),
        None => Ok(()),
    }
}

/// Which relative error to score a model with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMetric {
    /// Relative root-mean-square error.
    #[default]
    Rmse,
    /// Relative mean absolute error.
    Mae,
}

impl ErrorMetric {
    /// Scores approximations against reference values.
    pub fn compute(self, approximations: &[f64], true_values: &[f64]) -> OptionsResult<f64> {
        match self {
            Self::Rmse => model_rmse(approximations, true_values),
            Self::Mae => model_mae(approximations, true_values),
        }
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rmse => write!(f, "rmse"),
            Self::Mae => write!(f, "mae"),
        }
    }
}

impl FromStr for ErrorMetric {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rmse" => Ok(Self::Rmse),
            "mae" => Ok(Self::Mae),
            other => Err(OptionsError::invalid_input(format!(
                "unknown error metric '{other}'"
            ))),
        }
    }
}
