//! # Debreu Options
//!
//! Recovers Arrow-Debreu state prices, the discrete risk-neutral density, from
//! observed put and call prices.
//!
//! Given put quotes, call quotes and a set of hypothesized terminal levels of
//! the underlying, the crate:
//!
//! 1. builds the put and call payoff blocks ([`build_payoff_matrix`]),
//! 2. solves each block for the state prices with LU factorization
//!    ([`solve_state_prices`]),
//! 3. checks the solution for arbitrage and the market for completeness
//!    ([`has_arbitrage`], [`is_complete`]),
//! 4. re-prices held-out strikes and scores them ([`model_rmse`], [`model_mae`]).
//!
//! [`ArrowDebreuModel`] ties these together and memoizes the solve.
//! [`sweep_endpoints`] re-solves it across candidate outermost states.
//!
//! ## Quick Start
//!
//! ```rust
//! use debreu_options::prelude::*;
//!
//! let puts = OptionQuotes::from_columns(&[90.0, 100.0], &[1.0, 4.0]).unwrap();
//! let calls = OptionQuotes::from_columns(&[100.0, 110.0], &[3.5, 1.0]).unwrap();
//! let states = MarketStates::new(vec![85.0, 95.0], vec![105.0, 115.0]);
//!
//! let model = ArrowDebreuModel::new(puts, calls, states);
//! let q = model.state_prices().unwrap();
//!
//! assert_eq!(q.len(), 4);
//! assert!(model.is_complete());
//! ```
//!
//! The [`black_scholes`] module carries closed-form European and perpetual
//! American prices for comparison against the recovered density.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

pub mod black_scholes;
pub mod checks;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod payoff;
pub mod quote;
pub mod solver;
pub mod states;
pub mod sweep;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::black_scholes::{
        perpetual_american, value_batch, BlackScholes, ContractValuation, OptionContract,
    };
    pub use crate::checks::{
        has_arbitrage, is_complete, ArbitrageReport, ArbitrageViolation, Completeness,
    };
    pub use crate::error::{OptionsError, OptionsResult};
    pub use crate::evaluation::{approximate_prices, model_mae, model_rmse, ErrorMetric};
    pub use crate::model::ArrowDebreuModel;
    pub use crate::payoff::{build_payoff_matrix, OptionKind};
    pub use crate::quote::{OptionQuote, OptionQuotes};
    pub use crate::solver::{solve_state_prices, PayoffBlocks, StatePrices};
    pub use crate::states::MarketStates;
    pub use crate::sweep::{sweep_endpoints, EndpointOutcome};
}

pub use checks::{has_arbitrage, is_complete, ArbitrageReport, Completeness};
pub use error::{OptionsError, OptionsResult};
pub use evaluation::{approximate_prices, model_mae, model_rmse, ErrorMetric};
pub use model::ArrowDebreuModel;
pub use payoff::{build_payoff_matrix, OptionKind};
pub use quote::{OptionQuote, OptionQuotes};
pub use solver::{solve_state_prices, StatePrices};
pub use states::MarketStates;
pub use sweep::{sweep_endpoints, EndpointOutcome};
