//! CLI command implementations.

pub mod bond;
pub mod evaluate;
pub mod implied_vol;
pub mod root;
pub mod states;

pub use bond::BondArgs;
pub use evaluate::EvaluateArgs;
pub use implied_vol::ImpliedVolArgs;
pub use root::RootArgs;
pub use states::StatesArgs;

use crate::error::{CliError, CliResult};

/// Validates a strictly positive value.
pub fn validate_positive(name: &'static str, value: f64) -> CliResult<f64> {
    if value.is_nan() || value <= 0.0 {
        return Err(CliError::InvalidArgument {
            name,
            value,
            hint: "Must be positive.",
        });
    }
    Ok(value)
}

/// Validates a percentage-quoted rate.
pub fn validate_percent(name: &'static str, value: f64) -> CliResult<f64> {
    if !(-100.0..=100.0).contains(&value) {
        return Err(CliError::InvalidArgument {
            name,
            value,
            hint: "Must be a percentage between -100 and 100.",
        });
    }
    Ok(value)
}
