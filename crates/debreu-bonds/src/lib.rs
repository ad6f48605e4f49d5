//! # Debreu Bonds
//!
//! Fixed-coupon bonds under continuous compounding, face value 100.
//!
//! - [`CouponSchedule`]: payment times and amounts counted back from maturity
//! - [`Bond`]: price from yield, yield from price, duration and convexity
//! - [`BondAnalytics`]: the measures at one yield plus the price-change
//!   approximation `ΔB/B ≈ -D Δy + ½ C Δy²`
//!
//! ## Quick Start
//!
//! ```rust
//! use debreu_bonds::prelude::*;
//! use debreu_math::solvers::SolverConfig;
//!
//! let bond = Bond::new(CouponSchedule::new(2.0, 0.25, 0.08).unwrap());
//! let y = bond.yield_from_price(98.0, 0.1, &SolverConfig::default()).unwrap();
//!
//! assert!((bond.price_from_yield(y) - 98.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod analytics;
pub mod bond;
pub mod error;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::BondAnalytics;
    pub use crate::bond::Bond;
    pub use crate::error::{BondError, BondResult};
    pub use crate::schedule::{CashFlow, CouponSchedule, FACE_VALUE};
}

pub use analytics::BondAnalytics;
pub use bond::Bond;
pub use error::{BondError, BondResult};
pub use schedule::{CashFlow, CouponSchedule, FACE_VALUE};
