//! Strike/price pairs for traded options.

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};

/// Observed price of one option at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike level.
    pub strike: f64,
    /// Market price (typically the bid/ask mid).
    pub price: f64,
}

impl OptionQuote {
    /// Creates a quote.
    pub fn new(strike: f64, price: f64) -> Self {
        Self { strike, price }
    }

    /// Creates a quote priced at the bid/ask midpoint.
    pub fn from_bid_ask(strike: f64, bid: f64, ask: f64) -> Self {
        Self {
            strike,
            price: 0.5 * (bid + ask),
        }
    }
}

/// Ordered quotes for a single option type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionQuotes {
    quotes: Vec<OptionQuote>,
}

impl OptionQuotes {
    /// Wraps an ordered list of quotes.
    pub fn new(quotes: Vec<OptionQuote>) -> Self {
        Self { quotes }
    }

    /// Pairs strikes with prices index by index.
    ///
    /// Fails if the two sequences differ in length.
    pub fn from_columns(strikes: &[f64], prices: &[f64]) -> OptionsResult<Self> {
        if strikes.len() != prices.len() {
            return Err(OptionsError::dimension_mismatch(
                "quote prices",
                strikes.len(),
                prices.len(),
            ));
        }
        Ok(Self::new(
            strikes
                .iter()
                .zip(prices)
                .map(|(&k, &p)| OptionQuote::new(k, p))
                .collect(),
        ))
    }

    /// Strikes in quote order.
    pub fn strikes(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.strike).collect()
    }

    /// Prices in quote order.
    pub fn prices(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.price).collect()
    }

    /// Highest strike, if any.
    pub fn max_strike(&self) -> Option<f64> {
        self.quotes.iter().map(|q| q.strike).reduce(f64::max)
    }

    /// Lowest strike, if any.
    pub fn min_strike(&self) -> Option<f64> {
        self.quotes.iter().map(|q| q.strike).reduce(f64::min)
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True if there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterates over the quotes.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionQuote> {
        self.quotes.iter()
    }

    /// Borrows the quotes as a slice.
    pub fn as_slice(&self) -> &[OptionQuote] {
        &self.quotes
    }
}

impl From<Vec<OptionQuote>> for OptionQuotes {
    fn from(quotes: Vec<OptionQuote>) -> Self {
        Self::new(quotes)
    }
}

impl FromIterator<OptionQuote> for OptionQuotes {
    fn from_iter<I: IntoIterator<Item = OptionQuote>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionQuotes {
    type Item = &'a OptionQuote;
    type IntoIter = std::slice::Iter<'a, OptionQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_columns() {
        let quotes = OptionQuotes::from_columns(&[90.0, 100.0], &[12.0, 18.0]).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes.strikes(), vec![90.0, 100.0]);
        assert_eq!(quotes.prices(), vec![12.0, 18.0]);
    }

    #[test]
    fn test_from_columns_mismatch() {
        let err = OptionQuotes::from_columns(&[90.0, 100.0], &[12.0]).unwrap_err();

        assert!(matches!(err, OptionsError::DimensionMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_bid_ask_mid() {
        let q = OptionQuote::from_bid_ask(1200.0, 52.8, 54.8);

        assert_relative_eq!(q.price, 53.8, epsilon = 1e-12);
    }

    #[test]
    fn test_strike_extremes() {
        let quotes: OptionQuotes = vec![
            OptionQuote::new(1350.0, 99.55),
            OptionQuote::new(1175.0, 46.6),
            OptionQuote::new(1600.0, 7.9),
        ]
        .into();

        assert_eq!(quotes.min_strike(), Some(1175.0));
        assert_eq!(quotes.max_strike(), Some(1600.0));
        assert_eq!(OptionQuotes::default().max_strike(), None);
    }
}
