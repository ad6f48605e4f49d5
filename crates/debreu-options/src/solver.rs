//! State-price recovery from payoff blocks.
//!
//! The full payoff matrix is block diagonal: puts only see the put states and
//! calls only see the call states, so each block is factored and solved on
//! its own and the two solutions are concatenated put-then-call.

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use debreu_math::linear_algebra::{block_diagonal, LuFactorization};

use crate::error::{OptionsError, OptionsResult};
use crate::payoff::{build_payoff_matrix, OptionKind};

/// Arrow-Debreu prices of the hypothesized states, put states first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePrices {
    values: Vec<f64>,
    put_count: usize,
}

impl StatePrices {
    /// Concatenates the put-block and call-block solutions.
    pub fn new(put: Vec<f64>, call: Vec<f64>) -> Self {
        let put_count = put.len();
        let mut values = put;
        values.extend(call);
        Self { values, put_count }
    }

    /// All state prices.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// State prices of the put states.
    pub fn put_segment(&self) -> &[f64] {
        &self.values[..self.put_count]
    }

    /// State prices of the call states.
    pub fn call_segment(&self) -> &[f64] {
        &self.values[self.put_count..]
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no states were solved for.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all state prices, the implied price of a unit zero-coupon claim.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Iterates over the state prices.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Copies the prices into an `nalgebra` vector.
    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.values)
    }
}

impl AsRef<[f64]> for StatePrices {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// The two non-zero blocks of the payoff matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffBlocks {
    /// Put strikes × put states.
    pub put: DMatrix<f64>,
    /// Call strikes × call states.
    pub call: DMatrix<f64>,
}

impl PayoffBlocks {
    /// Builds both blocks.
    pub fn build(
        put_strikes: &[f64],
        put_states: &[f64],
        call_strikes: &[f64],
        call_states: &[f64],
    ) -> Self {
        Self {
            put: build_payoff_matrix(put_strikes, put_states, OptionKind::Put),
            call: build_payoff_matrix(call_strikes, call_states, OptionKind::Call),
        }
    }

    /// The full payoff matrix with both blocks on its diagonal.
    pub fn block_diagonal(&self) -> DMatrix<f64> {
        block_diagonal(&[self.put.clone(), self.call.clone()])
    }

    /// Solves both blocks against the observed prices.
    pub fn solve(&self, put_prices: &[f64], call_prices: &[f64]) -> OptionsResult<StatePrices> {
        let q_put = solve_block(OptionKind::Put, &self.put, put_prices)?;
        let q_call = solve_block(OptionKind::Call, &self.call, call_prices)?;
        Ok(StatePrices::new(q_put, q_call))
    }
}

/// Recovers state prices from put and call quotes.
///
/// Solves `put_block · q_put = put_prices` and `call_block · q_call = call_prices`
/// with LU factorization and returns `q_put ++ q_call`.
///
/// # Errors
///
/// - [`OptionsError::DimensionMismatch`] if a block is not square or prices
///   do not line up with strikes.
/// - [`OptionsError::SingularSystem`] if a block cannot be inverted, e.g.
///   because of duplicate strikes.
///
/// # Example
///
/// ```rust
/// use debreu_options::solve_state_prices;
///
/// let q = solve_state_prices(&[90.0, 100.0], &[12.0, 18.0], &[80.0, 95.0], &[], &[], &[]).unwrap();
/// assert!((q.as_slice()[0] - 1.2).abs() < 1e-12);
/// ```
pub fn solve_state_prices(
    put_strikes: &[f64],
    put_prices: &[f64],
    put_states: &[f64],
    call_strikes: &[f64],
    call_prices: &[f64],
    call_states: &[f64],
) -> OptionsResult<StatePrices> {
    PayoffBlocks::build(put_strikes, put_states, call_strikes, call_states)
        .solve(put_prices, call_prices)
}

fn solve_block(kind: OptionKind, block: &DMatrix<f64>, prices: &[f64]) -> OptionsResult<Vec<f64>> {
    if block.nrows() != prices.len() {
        return Err(OptionsError::dimension_mismatch(
            format!("{kind} prices"),
            block.nrows(),
            prices.len(),
        ));
    }
    if block.nrows() != block.ncols() {
        return Err(OptionsError::dimension_mismatch(
            format!("{kind} states"),
            block.nrows(),
            block.ncols(),
        ));
    }

    let lu = LuFactorization::new(block).map_err(|e| {
        if e.is_singular() {
            OptionsError::SingularSystem { kind }
        } else {
            OptionsError::from(e)
        }
    })?;
    let q = lu.solve(&DVector::from_column_slice(prices))?;

    debug!("solved {} block of size {}", kind, block.nrows());
    Ok(q.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_put_block_reproduces_prices() {
        let strikes = [90.0, 100.0];
        let prices = [12.0, 18.0];
        let states = [80.0, 95.0];

        let q = solve_state_prices(&strikes, &prices, &states, &[], &[], &[]).unwrap();
        let m = build_payoff_matrix(&strikes, &states, OptionKind::Put);
        let repriced = m * q.to_dvector();

        assert_relative_eq!(repriced[0], 12.0, epsilon = 1e-9);
        assert_relative_eq!(repriced[1], 18.0, epsilon = 1e-9);
        assert_relative_eq!(q.as_slice()[0], 1.2, epsilon = 1e-12);
        assert_relative_eq!(q.as_slice()[1], -1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_duplicate_strikes_are_singular() {
        let err = solve_state_prices(&[100.0, 100.0], &[5.0, 6.0], &[80.0, 95.0], &[], &[], &[])
            .unwrap_err();

        assert_eq!(err, OptionsError::SingularSystem { kind: OptionKind::Put });
    }

    #[test]
    fn test_non_square_block() {
        let err = solve_state_prices(&[], &[], &[], &[100.0, 110.0], &[8.0, 3.0], &[120.0])
            .unwrap_err();

        assert_eq!(err, OptionsError::dimension_mismatch("call states", 2, 1));
    }

    #[test]
    fn test_misaligned_prices() {
        let err = solve_state_prices(&[90.0, 100.0], &[12.0], &[80.0, 95.0], &[], &[], &[])
            .unwrap_err();

        assert_eq!(err, OptionsError::dimension_mismatch("put prices", 2, 1));
    }

    #[test]
    fn test_concatenation_order() {
        let q = solve_state_prices(
            &[100.0],
            &[2.0],
            &[90.0],
            &[100.0],
            &[3.0],
            &[110.0],
        )
        .unwrap();

        assert_eq!(q.len(), 2);
        assert_relative_eq!(q.put_segment()[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(q.call_segment()[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(q.total(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_block_diagonal_layout() {
        let blocks = PayoffBlocks::build(&[90.0, 100.0], &[80.0, 95.0], &[100.0], &[110.0]);

        let m = blocks.block_diagonal();

        assert_eq!(m.shape(), (3, 3));
        assert_relative_eq!(m[(2, 2)], 10.0);
        assert_relative_eq!(m[(0, 2)], 0.0);
        assert_relative_eq!(m[(2, 0)], 0.0);
    }
}
