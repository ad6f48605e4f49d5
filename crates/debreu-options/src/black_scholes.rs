//! Generalized Black-Scholes pricing with a cost-of-carry term.
//!
//! The carry `b` selects the underlying: `b = r` for a non-dividend stock,
//! `b = r - q` for a stock with continuous yield `q`, `b = 0` for a futures
//! contract, `b = r - r_f` for a currency.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use debreu_math::solvers::{newton_raphson, SolverConfig};

use crate::error::{OptionsError, OptionsResult};
use crate::payoff::OptionKind;

/// Standard normal cumulative distribution function.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal density.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Market parameters of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholes {
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Cost of carry.
    pub carry: f64,
    /// Time to expiry in years.
    pub expiry: f64,
}

impl BlackScholes {
    /// Creates a parameter set.
    ///
    /// Fails unless `volatility` and `expiry` are strictly positive.
    pub fn new(rate: f64, volatility: f64, carry: f64, expiry: f64) -> OptionsResult<Self> {
        if volatility.is_nan() || volatility <= 0.0 {
            return Err(OptionsError::invalid_input(format!(
                "volatility must be positive, got {volatility}"
            )));
        }
        if expiry.is_nan() || expiry <= 0.0 {
            return Err(OptionsError::invalid_input(format!(
                "expiry must be positive, got {expiry}"
            )));
        }
        Ok(Self {
            rate,
            volatility,
            carry,
            expiry,
        })
    }

    /// Same parameters with a different volatility.
    #[must_use]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    fn d1_d2(&self, spot: f64, strike: f64) -> (f64, f64) {
        let vol_sqrt_t = self.volatility * self.expiry.sqrt();
        let d1 = ((spot / strike).ln()
            + (self.carry + 0.5 * self.volatility * self.volatility) * self.expiry)
            / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    fn carry_discount(&self) -> f64 {
        ((self.carry - self.rate) * self.expiry).exp()
    }

    fn discount(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Option premium.
    pub fn price(&self, kind: OptionKind, spot: f64, strike: f64) -> f64 {
        let (d1, d2) = self.d1_d2(spot, strike);
        let fwd = spot * self.carry_discount();
        let pv_strike = strike * self.discount();
        match kind {
            OptionKind::Call => fwd * norm_cdf(d1) - pv_strike * norm_cdf(d2),
            OptionKind::Put => pv_strike * norm_cdf(-d2) - fwd * norm_cdf(-d1),
        }
    }

    /// Sensitivity of the premium to the underlying.
    pub fn delta(&self, kind: OptionKind, spot: f64, strike: f64) -> f64 {
        let (d1, _) = self.d1_d2(spot, strike);
        match kind {
            OptionKind::Call => self.carry_discount() * norm_cdf(d1),
            OptionKind::Put => self.carry_discount() * (norm_cdf(d1) - 1.0),
        }
    }

    /// Second derivative in the underlying; equal for puts and calls.
    pub fn gamma(&self, spot: f64, strike: f64) -> f64 {
        let (d1, _) = self.d1_d2(spot, strike);
        norm_pdf(d1) * self.carry_discount() / (spot * self.volatility * self.expiry.sqrt())
    }

    /// Sensitivity to volatility; equal for puts and calls.
    pub fn vega(&self, spot: f64, strike: f64) -> f64 {
        let (d1, _) = self.d1_d2(spot, strike);
        spot * self.carry_discount() * norm_pdf(d1) * self.expiry.sqrt()
    }

    /// Price of the opposite option implied by put-call parity.
    ///
    /// `C - P = S e^{(b-r)T} - K e^{-rT}`.
    pub fn parity_price(&self, kind: OptionKind, spot: f64, strike: f64, price: f64) -> f64 {
        let forward_leg = spot * self.carry_discount() - strike * self.discount();
        match kind {
            OptionKind::Call => price - forward_leg,
            OptionKind::Put => price + forward_leg,
        }
    }

    /// Volatility that reproduces `market_price`, by Newton iteration on vega.
    pub fn implied_volatility(
        &self,
        kind: OptionKind,
        spot: f64,
        strike: f64,
        market_price: f64,
        initial_guess: f64,
        config: &SolverConfig,
    ) -> OptionsResult<f64> {
        if market_price.is_nan() || market_price <= 0.0 {
            return Err(OptionsError::invalid_input(format!(
                "market price must be positive, got {market_price}"
            )));
        }
        let f = |vol: f64| self.with_volatility(vol).price(kind, spot, strike) - market_price;
        let df = |vol: f64| self.with_volatility(vol).vega(spot, strike);

        let result = newton_raphson(f, df, initial_guess, config)?;
        Ok(result.root)
    }
}

/// A single European contract: option type, underlying, strike and market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Put or call.
    pub kind: OptionKind,
    /// Underlying price.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Rate, volatility, carry and expiry.
    #[serde(flatten)]
    pub params: BlackScholes,
}

/// Price, delta and gamma of one contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractValuation {
    /// Option premium.
    pub price: f64,
    /// First derivative in the underlying.
    pub delta: f64,
    /// Second derivative in the underlying.
    pub gamma: f64,
}

impl OptionContract {
    /// Creates a contract.
    pub fn new(kind: OptionKind, spot: f64, strike: f64, params: BlackScholes) -> Self {
        Self {
            kind,
            spot,
            strike,
            params,
        }
    }

    /// Same contract on a different underlying price.
    #[must_use]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Prices the contract.
    pub fn value(&self) -> ContractValuation {
        ContractValuation {
            price: self.params.price(self.kind, self.spot, self.strike),
            delta: self.params.delta(self.kind, self.spot, self.strike),
            gamma: self.params.gamma(self.spot, self.strike),
        }
    }
}

/// Values every contract in the batch, in input order.
///
/// # Example
///
/// ```rust
/// use debreu_options::black_scholes::{value_batch, BlackScholes, OptionContract};
/// use debreu_options::OptionKind;
///
/// let params = BlackScholes::new(0.08, 0.30, 0.08, 0.25).unwrap();
/// let batch = [
///     OptionContract::new(OptionKind::Call, 60.0, 65.0, params),
///     OptionContract::new(OptionKind::Put, 60.0, 65.0, params),
/// ];
///
/// let values = value_batch(&batch);
/// assert!((values[0].price - 2.133368444916).abs() < 1e-9);
/// ```
pub fn value_batch(contracts: &[OptionContract]) -> Vec<ContractValuation> {
    contracts.iter().map(OptionContract::value).collect()
}

/// Copies of `base` at each underlying price in `spots`.
pub fn spot_ladder(base: OptionContract, spots: &[f64]) -> Vec<OptionContract> {
    spots.iter().map(|&s| base.with_spot(s)).collect()
}

/// Closed-form price of a perpetual American option.
///
/// Calls require `carry < rate`; otherwise early exercise is never optimal and
/// the price is unbounded.
pub fn perpetual_american(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    carry: f64,
) -> OptionsResult<f64> {
    if volatility.is_nan() || volatility <= 0.0 {
        return Err(OptionsError::invalid_input(format!(
            "volatility must be positive, got {volatility}"
        )));
    }
    let var = volatility * volatility;
    let shift = carry / var - 0.5;
    let root = (shift * shift + 2.0 * rate / var).sqrt();

    match kind {
        OptionKind::Call => {
            if carry >= rate {
                return Err(OptionsError::invalid_input(
                    "perpetual call needs carry below the rate",
                ));
            }
            let y1 = -shift + root;
            Ok(strike / (y1 - 1.0) * ((y1 - 1.0) / y1 * spot / strike).powf(y1))
        }
        OptionKind::Put => {
            let y2 = -shift - root;
            if y2.is_nan() || y2 >= 0.0 {
                return Err(OptionsError::invalid_input(
                    "perpetual put needs a positive rate",
                ));
            }
            Ok(strike / (1.0 - y2) * ((y2 - 1.0) / y2 * spot / strike).powf(y2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn batch_one() -> BlackScholes {
        BlackScholes::new(0.08, 0.30, 0.08, 0.25).unwrap()
    }

    #[test]
    fn test_norm_cdf() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(1.96), 0.975_002_104_851_78, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-1.0) + norm_cdf(1.0), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_european_prices() {
        let bs = batch_one();

        assert_relative_eq!(bs.price(OptionKind::Call, 60.0, 65.0), 2.133_368_444_916, epsilon = 1e-9);
        assert_relative_eq!(bs.price(OptionKind::Put, 60.0, 65.0), 5.846_282_209_855, epsilon = 1e-9);
    }

    #[test]
    fn test_parity() {
        let bs = batch_one();
        let call = bs.price(OptionKind::Call, 60.0, 65.0);
        let put = bs.price(OptionKind::Put, 60.0, 65.0);

        assert_relative_eq!(bs.parity_price(OptionKind::Call, 60.0, 65.0, call), put, epsilon = 1e-10);
        assert_relative_eq!(bs.parity_price(OptionKind::Put, 60.0, 65.0, put), call, epsilon = 1e-10);
    }

    #[test]
    fn test_greeks_on_futures() {
        let bs = BlackScholes::new(0.1, 0.36, 0.0, 0.5).unwrap();

        assert_relative_eq!(bs.delta(OptionKind::Call, 105.0, 100.0), 0.594_628_659_73, epsilon = 1e-9);
        assert_relative_eq!(bs.delta(OptionKind::Put, 105.0, 100.0), -0.356_600_764_77, epsilon = 1e-9);
        assert_relative_eq!(bs.gamma(105.0, 100.0), 0.013_493_637_11, epsilon = 1e-9);
        assert_relative_eq!(bs.vega(105.0, 100.0), 26.778_122_845_8, epsilon = 1e-8);
    }

    #[test]
    fn test_value_batch_mixed_contracts() {
        let futures = BlackScholes::new(0.1, 0.36, 0.0, 0.5).unwrap();
        let batch = [
            OptionContract::new(OptionKind::Call, 60.0, 65.0, batch_one()),
            OptionContract::new(OptionKind::Put, 60.0, 65.0, batch_one()),
            OptionContract::new(OptionKind::Call, 105.0, 100.0, futures),
            OptionContract::new(OptionKind::Put, 105.0, 100.0, futures),
        ];

        let values = value_batch(&batch);

        assert_eq!(values.len(), 4);
        assert_relative_eq!(values[0].price, 2.133_368_444_916, epsilon = 1e-9);
        assert_relative_eq!(values[1].price, 5.846_282_209_855, epsilon = 1e-9);
        assert_relative_eq!(values[2].delta, 0.594_628_659_73, epsilon = 1e-9);
        assert_relative_eq!(values[3].delta, -0.356_600_764_77, epsilon = 1e-9);
        assert_relative_eq!(values[2].gamma, values[3].gamma, epsilon = 1e-15);
        assert_relative_eq!(values[2].gamma, 0.013_493_637_11, epsilon = 1e-9);
    }

    #[test]
    fn test_spot_ladder() {
        let base = OptionContract::new(OptionKind::Call, 60.0, 65.0, batch_one());
        let ladder = spot_ladder(base, &[55.0, 60.0, 65.0, 70.0]);
        let values = value_batch(&ladder);

        assert_eq!(ladder[2].spot, 65.0);
        assert_eq!(values[1], base.value());
        // Call premium and delta rise with the underlying
        for pair in values.windows(2) {
            assert!(pair[1].price > pair[0].price);
            assert!(pair[1].delta > pair[0].delta);
        }
        assert!(value_batch(&[]).is_empty());
    }

    #[test]
    fn test_implied_volatility_round_trip() {
        let bs = batch_one();
        let market = bs.price(OptionKind::Call, 60.0, 65.0);

        let vol = bs
            .implied_volatility(OptionKind::Call, 60.0, 65.0, market, 0.2, &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(vol, 0.30, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(BlackScholes::new(0.05, 0.0, 0.05, 1.0).is_err());
        assert!(BlackScholes::new(0.05, 0.2, 0.05, -1.0).is_err());
        assert!(batch_one()
            .implied_volatility(OptionKind::Put, 60.0, 65.0, 0.0, 0.2, &SolverConfig::default())
            .is_err());
    }

    #[test]
    fn test_perpetual_american() {
        let call = perpetual_american(OptionKind::Call, 110.0, 100.0, 0.1, 0.1, 0.02).unwrap();
        let put = perpetual_american(OptionKind::Put, 110.0, 100.0, 0.1, 0.1, 0.02).unwrap();

        assert_relative_eq!(call, 18.503_499_883, epsilon = 1e-8);
        assert_relative_eq!(put, 3.031_060_383, epsilon = 1e-8);
    }

    #[test]
    fn test_perpetual_call_needs_carry_below_rate() {
        assert!(perpetual_american(OptionKind::Call, 110.0, 100.0, 0.05, 0.2, 0.05).is_err());
    }
}
