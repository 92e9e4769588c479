//! # Error Types
//!
//! One error enum for the withholding workspace, derived with `thiserror`.
//!
//! Typed parameter lookups never produce errors: a mismatched or missing
//! value falls back to zero. Errors are reserved for configuration,
//! amount parsing, handler resolution, and calculator failures.

use thiserror::Error;

/// Top-level error type for withholding calculation.
#[derive(Error, Debug)]
pub enum WhtError {
    /// Configuration file or value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A monetary amount could not be parsed as an exact decimal.
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A setting names a handler that no registry entry provides.
    #[error("no withholding handler registered under {0:?}")]
    UnknownHandler(String),

    /// A calculator rejected the run.
    #[error("withholding calculation failed: {0}")]
    Calculation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for WhtError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for WhtError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
