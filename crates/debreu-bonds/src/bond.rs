//! Bond pricing under continuous compounding.

use log::debug;
use serde::{Deserialize, Serialize};

use debreu_math::solvers::{newton_raphson, SolverConfig};
use debreu_math::MathError;

use crate::error::{BondError, BondResult};
use crate::schedule::CouponSchedule;

/// A fixed-coupon bond, optionally with an observed market price.
///
/// Prices are per 100 face. A yield `y` discounts a payment at time `t` by
/// `e^{-y t}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    schedule: CouponSchedule,
    market_price: Option<f64>,
}

impl Bond {
    /// Creates a bond with no market price.
    pub fn new(schedule: CouponSchedule) -> Self {
        Self {
            schedule,
            market_price: None,
        }
    }

    /// Attaches an observed price.
    #[must_use]
    pub fn with_market_price(mut self, price: f64) -> Self {
        self.market_price = Some(price);
        self
    }

    /// The cash-flow schedule.
    pub fn schedule(&self) -> &CouponSchedule {
        &self.schedule
    }

    /// The observed price, if any.
    pub fn market_price(&self) -> Option<f64> {
        self.market_price
    }

    /// `B(y) = Σ v_i e^{-y t_i}`.
    pub fn price_from_yield(&self, y: f64) -> f64 {
        self.schedule
            .cash_flows()
            .iter()
            .map(|cf| cf.amount * (-y * cf.time).exp())
            .sum()
    }

    /// `B'(y) = -Σ v_i t_i e^{-y t_i}`.
    pub fn price_derivative(&self, y: f64) -> f64 {
        -self
            .schedule
            .cash_flows()
            .iter()
            .map(|cf| cf.amount * cf.time * (-y * cf.time).exp())
            .sum::<f64>()
    }

    /// `B''(y) = Σ v_i t_i² e^{-y t_i}`.
    pub fn price_second_derivative(&self, y: f64) -> f64 {
        self.schedule
            .cash_flows()
            .iter()
            .map(|cf| cf.amount * cf.time * cf.time * (-y * cf.time).exp())
            .sum()
    }

    /// Solves `B(y) = price` by Newton's method.
    pub fn yield_from_price(&self, price: f64, guess: f64, config: &SolverConfig) -> BondResult<f64> {
        if !price.is_finite() || price <= 0.0 {
            return Err(BondError::invalid_price(format!(
                "price must be positive, got {price}"
            )));
        }

        let f = |y: f64| self.price_from_yield(y) - price;
        let df = |y: f64| self.price_derivative(y);

        match newton_raphson(f, df, guess, config) {
            Ok(result) => {
                debug!(
                    "yield {:.10} for price {} after {} iterations",
                    result.root, price, result.iterations
                );
                Ok(result.root)
            }
            Err(MathError::ConvergenceFailed { iterations, .. }) => {
                Err(BondError::YieldConvergenceFailed { iterations })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Yield implied by the attached market price.
    pub fn market_yield(&self, guess: f64, config: &SolverConfig) -> BondResult<f64> {
        let price = self
            .market_price
            .ok_or_else(|| BondError::invalid_price("no market price attached"))?;
        self.yield_from_price(price, guess, config)
    }

    /// Duration, `-B'(y) / B(y)`.
    pub fn duration(&self, y: f64) -> f64 {
        -self.price_derivative(y) / self.price_from_yield(y)
    }

    /// Convexity, `B''(y) / B(y)`.
    pub fn convexity(&self, y: f64) -> f64 {
        self.price_second_derivative(y) / self.price_from_yield(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quarterly_bond() -> Bond {
        Bond::new(CouponSchedule::new(2.0, 0.25, 0.08).unwrap())
    }

    #[test]
    fn test_price_and_derivatives() {
        let bond = quarterly_bond();

        assert_relative_eq!(bond.price_from_yield(0.09), 98.005_556_958_587_19, epsilon = 1e-10);
        assert_relative_eq!(bond.price_derivative(0.09), -182.915_060_130_260_83, epsilon = 1e-10);
        assert_relative_eq!(bond.price_second_derivative(0.09), 356.226_553_753_262_4, epsilon = 1e-10);
    }

    #[test]
    fn test_duration_and_convexity() {
        let bond = quarterly_bond();

        assert_relative_eq!(bond.duration(0.09), 1.866_374_375_154_590_7, epsilon = 1e-12);
        assert_relative_eq!(bond.convexity(0.09), 3.634_758_730_097_192, epsilon = 1e-12);
    }

    #[test]
    fn test_yield_from_price() {
        let bond = quarterly_bond();

        let y = bond.yield_from_price(98.0, 0.1, &SolverConfig::default()).unwrap();

        assert_relative_eq!(y, 0.090_030_380_893_6, epsilon = 1e-9);
        assert_relative_eq!(bond.price_from_yield(y), 98.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_coupon_yield() {
        let bond = Bond::new(CouponSchedule::zero_coupon(3.0).unwrap());

        let y = bond.yield_from_price(100.0 * (-0.15_f64).exp(), 0.1, &SolverConfig::default()).unwrap();

        assert_relative_eq!(y, 0.05, epsilon = 1e-10);
        assert_relative_eq!(bond.duration(y), 3.0, epsilon = 1e-12);
        assert_relative_eq!(bond.convexity(y), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_market_yield() {
        let bond = quarterly_bond();
        assert!(matches!(
            bond.market_yield(0.1, &SolverConfig::default()),
            Err(BondError::InvalidPrice { .. })
        ));

        let bond = bond.with_market_price(98.0);
        let y = bond.market_yield(0.1, &SolverConfig::default()).unwrap();
        assert_relative_eq!(y, 0.090_030_380_893_6, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_price() {
        let bond = quarterly_bond();

        assert!(matches!(
            bond.yield_from_price(-1.0, 0.1, &SolverConfig::default()),
            Err(BondError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_yield_convergence_failure() {
        let bond = quarterly_bond();
        let config = SolverConfig::default().with_max_iterations(1);

        let err = bond.yield_from_price(98.0, 0.5, &config).unwrap_err();

        assert_eq!(err, BondError::YieldConvergenceFailed { iterations: 1 });
    }
}
