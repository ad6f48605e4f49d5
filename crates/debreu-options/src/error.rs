//! Error types for state-price recovery and option pricing.

use thiserror::Error;

use debreu_math::MathError;

use crate::payoff::OptionKind;

/// A specialized Result type for option operations.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors that can occur while building, solving or scoring a state-price model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Two sequences that must line up do not.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being compared.
        context: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A payoff block has no unique solution.
    #[error("Singular {kind} payoff block: strikes do not span the {kind} states")]
    SingularSystem {
        /// Which block failed to factor.
        kind: OptionKind,
    },

    /// A reference value used as an error-metric denominator is zero.
    #[error("Reference value at index {index} is zero")]
    InvalidReferenceValue {
        /// Position of the offending value.
        index: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Lower-level numerical failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl OptionsError {
    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OptionsError::dimension_mismatch("put states", 4, 3);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in put states: expected 4, got 3"
        );

        let err = OptionsError::SingularSystem {
            kind: OptionKind::Call,
        };
        assert!(err.to_string().contains("call payoff block"));
    }

    #[test]
    fn test_from_math_error() {
        let err: OptionsError = MathError::invalid_input("bad").into();
        assert!(matches!(err, OptionsError::Math(_)));
    }
}
