//! Yield, duration and convexity bundled for reporting.

use serde::Serialize;

use debreu_math::solvers::SolverConfig;

use crate::bond::Bond;
use crate::error::BondResult;

/// Risk measures of a bond at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondAnalytics {
    /// Continuously compounded yield.
    pub yield_value: f64,
    /// Price per 100 face.
    pub price: f64,
    /// `-B'/B`.
    pub duration: f64,
    /// `B''/B`.
    pub convexity: f64,
}

impl BondAnalytics {
    /// Analytics at a given yield.
    pub fn from_yield(bond: &Bond, yield_value: f64) -> Self {
        Self {
            yield_value,
            price: bond.price_from_yield(yield_value),
            duration: bond.duration(yield_value),
            convexity: bond.convexity(yield_value),
        }
    }

    /// Analytics at the yield implied by `price`.
    pub fn from_price(bond: &Bond, price: f64, guess: f64, config: &SolverConfig) -> BondResult<Self> {
        let yield_value = bond.yield_from_price(price, guess, config)?;
        Ok(Self::from_yield(bond, yield_value))
    }

    /// Relative price change for a yield shift, duration only.
    pub fn price_change_first_order(&self, dy: f64) -> f64 {
        -self.duration * dy
    }

    /// Relative price change for a yield shift, `-D Δy + ½ C Δy²`.
    pub fn price_change(&self, dy: f64) -> f64 {
        -self.duration * dy + 0.5 * self.convexity * dy * dy
    }

    /// Price after a yield shift, using the second-order approximation.
    pub fn approximate_price(&self, dy: f64) -> f64 {
        self.price * (1.0 + self.price_change(dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::CouponSchedule;
    use approx::assert_relative_eq;

    fn quarterly_bond() -> Bond {
        Bond::new(CouponSchedule::new(2.0, 0.25, 0.08).unwrap())
    }

    #[test]
    fn test_from_yield() {
        let a = BondAnalytics::from_yield(&quarterly_bond(), 0.09);

        assert_relative_eq!(a.price, 98.005_556_958_587_19, epsilon = 1e-10);
        assert_relative_eq!(a.duration, 1.866_374_375_154_590_7, epsilon = 1e-12);
        assert_relative_eq!(a.convexity, 3.634_758_730_097_192, epsilon = 1e-12);
    }

    #[test]
    fn test_convexity_improves_approximation() {
        let bond = quarterly_bond();
        let a = BondAnalytics::from_yield(&bond, 0.09);
        let dy = 0.001;

        let exact = bond.price_from_yield(0.09 + dy) / a.price - 1.0;

        assert_relative_eq!(a.price_change(dy), exact, epsilon = 1e-8);
        assert!((a.price_change(dy) - exact).abs() < (a.price_change_first_order(dy) - exact).abs());
    }

    #[test]
    fn test_from_price_round_trip() {
        let bond = quarterly_bond();

        let a = BondAnalytics::from_price(&bond, 98.0, 0.1, &SolverConfig::default()).unwrap();

        assert_relative_eq!(a.price, 98.0, epsilon = 1e-9);
        assert_relative_eq!(a.approximate_price(0.0), 98.0, epsilon = 1e-9);
    }
}
