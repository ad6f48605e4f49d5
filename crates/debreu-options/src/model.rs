//! The memoized Arrow-Debreu state-price model.

use std::sync::OnceLock;

use log::debug;
use nalgebra::DMatrix;

use crate::checks::{has_arbitrage, ArbitrageReport, Completeness};
use crate::error::{OptionsError, OptionsResult};
use crate::evaluation::{approximate_prices, ErrorMetric};
use crate::quote::OptionQuotes;
use crate::solver::{PayoffBlocks, StatePrices};
use crate::states::MarketStates;

/// State-price model over a fixed set of put and call quotes.
///
/// Inputs are owned and never change. The payoff blocks and the state-price
/// solve are computed on first access and reused afterwards; a failed solve
/// is stored too, so repeated calls return the same error.
///
/// # Example
///
/// ```rust
/// use debreu_options::{ArrowDebreuModel, MarketStates, OptionQuotes};
///
/// let puts = OptionQuotes::from_columns(&[90.0, 100.0], &[12.0, 18.0]).unwrap();
/// let model = ArrowDebreuModel::new(puts, OptionQuotes::default(), MarketStates::new(vec![80.0, 95.0], vec![]));
///
/// assert!(model.has_arbitrage().unwrap());
/// assert!(model.is_complete());
/// ```
#[derive(Debug)]
pub struct ArrowDebreuModel {
    puts: OptionQuotes,
    calls: OptionQuotes,
    states: MarketStates,
    blocks: OnceLock<PayoffBlocks>,
    state_prices: OnceLock<OptionsResult<StatePrices>>,
}

impl ArrowDebreuModel {
    /// Creates a model. Nothing is computed until first use.
    pub fn new(puts: OptionQuotes, calls: OptionQuotes, states: MarketStates) -> Self {
        Self {
            puts,
            calls,
            states,
            blocks: OnceLock::new(),
            state_prices: OnceLock::new(),
        }
    }

    /// Creates a model whose states are partitioned from a flat level list.
    ///
    /// See [`MarketStates::partition`].
    pub fn with_levels(puts: OptionQuotes, calls: OptionQuotes, levels: &[f64]) -> Self {
        let states = MarketStates::partition(levels, &puts, &calls);
        Self::new(puts, calls, states)
    }

    /// Put quotes.
    pub fn puts(&self) -> &OptionQuotes {
        &self.puts
    }

    /// Call quotes.
    pub fn calls(&self) -> &OptionQuotes {
        &self.calls
    }

    /// Hypothesized states.
    pub fn states(&self) -> &MarketStates {
        &self.states
    }

    /// The put and call payoff blocks.
    pub fn payoff_blocks(&self) -> &PayoffBlocks {
        self.blocks.get_or_init(|| {
            debug!(
                "building payoff blocks: {} puts x {} states, {} calls x {} states",
                self.puts.len(),
                self.states.put_states.len(),
                self.calls.len(),
                self.states.call_states.len()
            );
            PayoffBlocks::build(
                &self.puts.strikes(),
                &self.states.put_states,
                &self.calls.strikes(),
                &self.states.call_states,
            )
        })
    }

    /// The block-diagonal payoff matrix.
    pub fn payoff_matrix(&self) -> DMatrix<f64> {
        self.payoff_blocks().block_diagonal()
    }

    /// Solved state prices, put states first.
    ///
    /// The solve runs once; later calls return the stored result.
    pub fn state_prices(&self) -> OptionsResult<&StatePrices> {
        self.state_prices
            .get_or_init(|| {
                debug!("solving state prices over {} states", self.states.total());
                self.payoff_blocks()
                    .solve(&self.puts.prices(), &self.calls.prices())
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// True iff any solved state price is negative.
    pub fn has_arbitrage(&self) -> OptionsResult<bool> {
        Ok(has_arbitrage(self.state_prices()?.as_slice()))
    }

    /// Each negative state price with its state level.
    pub fn arbitrage_report(&self) -> OptionsResult<ArbitrageReport> {
        let q = self.state_prices()?;
        Ok(ArbitrageReport::scan(&self.states.combined(), q.as_slice()))
    }

    /// Rank of the payoff matrix against the number of states.
    pub fn completeness(&self) -> Completeness {
        Completeness::assess(&self.payoff_matrix(), self.states.total())
    }

    /// True iff the payoff matrix spans every state.
    pub fn is_complete(&self) -> bool {
        self.completeness().is_complete()
    }

    /// Prices the given strikes off the solved state prices.
    ///
    /// Returns put approximations followed by call approximations.
    pub fn approximate_prices(&self, put_strikes: &[f64], call_strikes: &[f64]) -> OptionsResult<Vec<f64>> {
        let q = self.state_prices()?;
        approximate_prices(put_strikes, call_strikes, &self.states.combined(), q.as_slice())
    }

    /// Relative RMSE of the model's prices against `true_values`.
    pub fn model_rmse(&self, put_strikes: &[f64], call_strikes: &[f64], true_values: &[f64]) -> OptionsResult<f64> {
        self.evaluate(put_strikes, call_strikes, true_values, ErrorMetric::Rmse)
    }

    /// Relative MAE of the model's prices against `true_values`.
    pub fn model_mae(&self, put_strikes: &[f64], call_strikes: &[f64], true_values: &[f64]) -> OptionsResult<f64> {
        self.evaluate(put_strikes, call_strikes, true_values, ErrorMetric::Mae)
    }

    /// Scores the model's prices with the chosen metric.
    ///
    /// `true_values` lists put prices then call prices, matching the order of
    /// [`ArrowDebreuModel::approximate_prices`].
    pub fn evaluate(
        &self,
        put_strikes: &[f64],
        call_strikes: &[f64],
        true_values: &[f64],
        metric: ErrorMetric,
    ) -> OptionsResult<f64> {
        let expected = put_strikes.len() + call_strikes.len();
        if true_values.len() != expected {
            return Err(OptionsError::dimension_mismatch(
                "true values",
                expected,
                true_values.len(),
            ));
        }
        let approximations = self.approximate_prices(put_strikes, call_strikes)?;
        metric.compute(&approximations, true_values)
    }

    /// Scores the model against held-out put and call quotes.
    pub fn evaluate_quotes(
        &self,
        puts: &OptionQuotes,
        calls: &OptionQuotes,
        metric: ErrorMetric,
    ) -> OptionsResult<f64> {
        let mut true_values = puts.prices();
        true_values.extend(calls.prices());
        self.evaluate(&puts.strikes(), &calls.strikes(), &true_values, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn put_model() -> ArrowDebreuModel {
        let puts = OptionQuotes::from_columns(&[90.0, 100.0], &[12.0, 18.0]).unwrap();
        ArrowDebreuModel::new(
            puts,
            OptionQuotes::default(),
            MarketStates::new(vec![80.0, 95.0], vec![]),
        )
    }

    #[test]
    fn test_state_prices_are_memoized() {
        let model = put_model();

        let first = model.state_prices().unwrap();
        let second = model.state_prices().unwrap();

        assert!(std::ptr::eq(first, second));
        assert_relative_eq!(first.as_slice()[0], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_failed_solve_is_memoized() {
        let puts = OptionQuotes::from_columns(&[100.0, 100.0], &[5.0, 6.0]).unwrap();
        let model = ArrowDebreuModel::new(
            puts,
            OptionQuotes::default(),
            MarketStates::new(vec![80.0, 95.0], vec![]),
        );

        let first = model.state_prices().unwrap_err();
        let second = model.state_prices().unwrap_err();

        assert_eq!(first, second);
        assert!(matches!(first, OptionsError::SingularSystem { .. }));
        assert!(!model.is_complete());
    }

    #[test]
    fn test_arbitrage_report() {
        let model = put_model();

        let report = model.arbitrage_report().unwrap();

        assert!(model.has_arbitrage().unwrap());
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations[0].state, 95.0);
    }

    #[test]
    fn test_completeness() {
        assert_eq!(put_model().completeness(), Completeness::Complete);
    }

    #[test]
    fn test_evaluate_rejects_misaligned_true_values() {
        let model = put_model();

        let err = model.model_mae(&[90.0], &[], &[1.0, 2.0]).unwrap_err();

        assert_eq!(err, OptionsError::dimension_mismatch("true values", 1, 2));
    }

    #[test]
    fn test_reprices_own_quotes() {
        let model = put_model();

        let approx = model.approximate_prices(&[90.0, 100.0], &[]).unwrap();

        assert_relative_eq!(approx[0], 12.0, epsilon = 1e-9);
        assert_relative_eq!(approx[1], 18.0, epsilon = 1e-9);
        assert_relative_eq!(model.model_rmse(&[90.0, 100.0], &[], &[12.0, 18.0]).unwrap(), 0.0, epsilon = 1e-9);
    }
}
