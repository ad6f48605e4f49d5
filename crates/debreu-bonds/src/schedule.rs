//! Coupon schedules counted back from maturity.

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// Face value every bond repays at maturity.
pub const FACE_VALUE: f64 = 100.0;

/// Cash-flow times closer to zero than this are dropped.
const MIN_CASH_FLOW_TIME: f64 = 1e-12;

/// A single dated payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Time from today in years.
    pub time: f64,
    /// Payment amount per 100 face.
    pub amount: f64,
}

/// Fixed-coupon cash flows of a bond with face value 100.
///
/// Payment times step back from maturity by one coupon period and stop at
/// the first non-positive time, so a bond between coupon dates has a short
/// first period. Times are stored ascending.
///
/// ```rust
/// use debreu_bonds::CouponSchedule;
///
/// let s = CouponSchedule::new(1.0, 0.5, 0.06).unwrap();
/// assert_eq!(s.times(), vec![0.5, 1.0]);
/// assert_eq!(s.amounts(), vec![3.0, 103.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponSchedule {
    maturity: f64,
    period: f64,
    coupon_rate: f64,
    cash_flows: Vec<CashFlow>,
}

impl CouponSchedule {
    /// Builds the schedule.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Years to the final payment
    /// * `period` - Years between coupons (0.5 for semi-annual)
    /// * `coupon_rate` - Annual coupon rate as a decimal
    pub fn new(maturity: f64, period: f64, coupon_rate: f64) -> BondResult<Self> {
        if maturity.is_nan() || maturity <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if period.is_nan() || period <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "coupon period must be positive, got {period}"
            )));
        }
        if !coupon_rate.is_finite() {
            return Err(BondError::invalid_spec("coupon rate must be finite"));
        }

        let coupon = FACE_VALUE * period * coupon_rate;
        let count = (maturity / period).ceil() as usize;

        let mut cash_flows: Vec<CashFlow> = (0..count)
            .map(|i| maturity - period * i as f64)
            .filter(|t| *t > MIN_CASH_FLOW_TIME)
            .map(|time| CashFlow {
                time,
                amount: coupon,
            })
            .collect();
        cash_flows.reverse();

        if let Some(last) = cash_flows.last_mut() {
            last.amount += FACE_VALUE;
        }

        Ok(Self {
            maturity,
            period,
            coupon_rate,
            cash_flows,
        })
    }

    /// A zero-coupon bond paying 100 at `maturity`.
    pub fn zero_coupon(maturity: f64) -> BondResult<Self> {
        Self::new(maturity, maturity, 0.0)
    }

    /// Years to maturity.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Years between coupons.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Annual coupon rate.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Payments in time order.
    pub fn cash_flows(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Payment times in years.
    pub fn times(&self) -> Vec<f64> {
        self.cash_flows.iter().map(|cf| cf.time).collect()
    }

    /// Payment amounts.
    pub fn amounts(&self) -> Vec<f64> {
        self.cash_flows.iter().map(|cf| cf.amount).collect()
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// Always false for a valid schedule.
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarterly_schedule() {
        let s = CouponSchedule::new(2.0, 0.25, 0.08).unwrap();

        assert_eq!(s.len(), 8);
        assert_relative_eq!(s.times()[0], 0.25);
        assert_relative_eq!(s.times()[7], 2.0);
        assert!(s.amounts()[..7].iter().all(|a| (*a - 2.0).abs() < 1e-12));
        assert_relative_eq!(s.amounts()[7], 102.0, epsilon = 1e-12);
    }

    #[test]
    fn test_short_first_period() {
        let s = CouponSchedule::new(1.0, 0.3, 0.10).unwrap();
        let times = s.times();

        assert_eq!(times.len(), 4);
        assert_relative_eq!(times[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(times[3], 1.0);
    }

    #[test]
    fn test_period_longer_than_maturity() {
        let s = CouponSchedule::new(0.4, 1.0, 0.05).unwrap();

        assert_eq!(s.times(), vec![0.4]);
        assert_relative_eq!(s.amounts()[0], 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon() {
        let s = CouponSchedule::zero_coupon(3.0).unwrap();

        assert_eq!(s.cash_flows(), &[CashFlow { time: 3.0, amount: 100.0 }]);
    }

    #[test]
    fn test_invalid_spec() {
        assert!(matches!(
            CouponSchedule::new(0.0, 0.5, 0.05),
            Err(BondError::InvalidSpec { .. })
        ));
        assert!(matches!(
            CouponSchedule::new(2.0, -0.5, 0.05),
            Err(BondError::InvalidSpec { .. })
        ));
        assert!(CouponSchedule::new(2.0, 0.5, f64::NAN).is_err());
    }
}
