//! Error types for the BudgetWatch risk engine.
//!
//! All errors use the `BW_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Assessment input errors
//! - 9xx: General / internal errors

use thiserror::Error;

/// Central error enum for all BudgetWatch operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetWatchError {
    // =================================================================
    // Assessment Input Errors (1xx)
    // =================================================================
    /// The snapshot cannot be assessed (zero allocation, inverted window, ...).
    #[error("BW_ERR_100: Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A monetary computation overflowed the decimal range.
    #[error("BW_ERR_101: Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("BW_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("BW_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bad thresholds, malformed config document, ...).
    #[error("BW_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl BudgetWatchError {
    /// Shorthand for an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, BudgetWatchError>;

impl From<serde_json::Error> for BudgetWatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
