//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file is malformed or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line value.
    #[error("Invalid {name}: {value}. {hint}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Supplied value.
        value: f64,
        /// What is accepted.
        hint: &'static str,
    },

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// State-price model failed.
    #[error("Calculation error: {0}")]
    Calculation(#[from] debreu_options::OptionsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("Scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
