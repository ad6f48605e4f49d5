//! Error types for bond operations.

use thiserror::Error;

use debreu_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid price.
    #[error("Invalid price: {reason}")]
    InvalidPrice {
        /// Description of what's invalid.
        reason: String,
    },

    /// Yield calculation failed to converge.
    #[error("Yield calculation failed to converge after {iterations} iterations")]
    YieldConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
    },

    /// Lower-level numerical failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            reason: reason.into(),
        }
    }
}
