//! Endpoint sweeps.
//!
//! The lowest and highest hypothesized states are the least pinned down by
//! the quotes. A sweep re-solves the model for every pairing of candidate
//! endpoints around a fixed interior and records whether each choice admits
//! arbitrage.

use log::debug;
use serde::Serialize;

use crate::checks::{ArbitrageReport, Completeness};
use crate::error::{OptionsError, OptionsResult};
use crate::model::ArrowDebreuModel;
use crate::quote::OptionQuotes;
use crate::solver::StatePrices;
use crate::states::MarketStates;

/// Solved model for one pair of endpoint states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointOutcome {
    /// Lowest state level.
    pub low: f64,
    /// Highest state level.
    pub high: f64,
    /// Partition the endpoints produced.
    pub states: MarketStates,
    /// Solved state prices.
    pub state_prices: StatePrices,
    /// Negative state prices, if any.
    pub arbitrage: ArbitrageReport,
    /// Rank of the payoff matrix against the state count.
    pub completeness: Completeness,
}

impl EndpointOutcome {
    /// Returns true if this endpoint pair admits arbitrage.
    pub fn has_arbitrage(&self) -> bool {
        self.arbitrage.has_arbitrage()
    }
}

/// Solves the model for every `(low, high)` pair, `lows` outermost.
///
/// Each run partitions `low`, then `interior`, then `high` with
/// [`MarketStates::partition`]. A pair whose blocks are singular or the wrong
/// size fails the whole sweep.
///
/// # Example
///
/// ```rust
/// use debreu_options::{sweep_endpoints, OptionQuotes};
///
/// let puts = OptionQuotes::from_columns(&[90.0, 100.0], &[1.0, 4.0]).unwrap();
/// let calls = OptionQuotes::from_columns(&[100.0, 110.0], &[3.5, 1.0]).unwrap();
///
/// let sweep = sweep_endpoints(&puts, &calls, &[95.0, 105.0], &[80.0, 85.0], &[115.0]).unwrap();
/// assert_eq!(sweep.len(), 2);
/// assert_eq!(sweep[1].low, 85.0);
/// ```
pub fn sweep_endpoints(
    puts: &OptionQuotes,
    calls: &OptionQuotes,
    interior: &[f64],
    lows: &[f64],
    highs: &[f64],
) -> OptionsResult<Vec<EndpointOutcome>> {
    if lows.is_empty() || highs.is_empty() {
        return Err(OptionsError::invalid_input(
            "endpoint sweep needs at least one low and one high level",
        ));
    }

    let mut outcomes = Vec::with_capacity(lows.len() * highs.len());
    for &low in lows {
        for &high in highs {
            let mut levels = Vec::with_capacity(interior.len() + 2);
            levels.push(low);
            levels.extend_from_slice(interior);
            levels.push(high);

            let states = MarketStates::partition(&levels, puts, calls);
            let model = ArrowDebreuModel::new(puts.clone(), calls.clone(), states.clone());
            let arbitrage = model.arbitrage_report()?;
            debug!(
                "endpoints ({}, {}): {} negative state prices",
                low,
                high,
                arbitrage.len()
            );

            outcomes.push(EndpointOutcome {
                low,
                high,
                states,
                state_prices: model.state_prices()?.clone(),
                arbitrage,
                completeness: model.completeness(),
            });
        }
    }

    Ok(outcomes)
}
