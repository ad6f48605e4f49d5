//! Hypothesized terminal market states.

use serde::{Deserialize, Serialize};

use crate::quote::OptionQuotes;

/// Terminal underlying levels split into the states priced by puts and the
/// states priced by calls.
///
/// Each half must have as many states as there are quotes of that type for
/// the corresponding payoff block to be square.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStates {
    /// States at which put payoffs are (mostly) positive.
    pub put_states: Vec<f64>,
    /// States at which call payoffs are (mostly) positive.
    pub call_states: Vec<f64>,
}

impl MarketStates {
    /// Creates a partition from explicit put and call state lists.
    pub fn new(put_states: Vec<f64>, call_states: Vec<f64>) -> Self {
        Self {
            put_states,
            call_states,
        }
    }

    /// Partitions a flat list of levels using the quoted strikes.
    ///
    /// Put states are the levels strictly below the highest put strike; call
    /// states are the levels strictly above the lowest call strike. A level
    /// may land in both halves when the strike ranges overlap.
    ///
    /// ```rust
    /// use debreu_options::{MarketStates, OptionQuotes};
    ///
    /// let puts = OptionQuotes::from_columns(&[800.0, 1200.0], &[1.4, 54.9]).unwrap();
    /// let calls = OptionQuotes::from_columns(&[1200.0, 1425.0], &[53.8, 1.6]).unwrap();
    ///
    /// let states = MarketStates::partition(&[650.0, 1000.0, 1300.0, 1500.0], &puts, &calls);
    /// assert_eq!(states.put_states, vec![650.0, 1000.0]);
    /// assert_eq!(states.call_states, vec![1300.0, 1500.0]);
    /// ```
    pub fn partition(levels: &[f64], puts: &OptionQuotes, calls: &OptionQuotes) -> Self {
        let put_states = match puts.max_strike() {
            Some(max_put) => levels.iter().copied().filter(|s| *s < max_put).collect(),
            None => Vec::new(),
        };
        let call_states = match calls.min_strike() {
            Some(min_call) => levels.iter().copied().filter(|s| *s > min_call).collect(),
            None => Vec::new(),
        };
        Self::new(put_states, call_states)
    }

    /// Put states followed by call states.
    pub fn combined(&self) -> Vec<f64> {
        let mut all = Vec::with_capacity(self.total());
        all.extend_from_slice(&self.put_states);
        all.extend_from_slice(&self.call_states);
        all
    }

    /// Total number of states across both halves.
    pub fn total(&self) -> usize {
        self.put_states.len() + self.call_states.len()
    }
}
