//! Error types for keep ledger and check-in operations.

use thiserror::Error;

/// Result type alias for ledger calculations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised while computing or verifying a keep ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Weeks away must be a positive integer, got {0}")]
    InvalidWeeks(i64),

    #[error("Net profit lists currency '{currency}' which has no breakdown")]
    NetProfitWithoutBreakdown { currency: String },

    #[error("Net profit for '{currency}' is {actual}, expected {expected}")]
    NetProfitMismatch {
        currency: String,
        expected: f64,
        actual: f64,
    },

    #[error("Ledger amounts for '{currency}' are not finite")]
    NonFiniteAmount { currency: String },
}

/// Errors raised while persisting or reading check-ins.
#[derive(Error, Debug)]
pub enum CheckInError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Player keep not found: {0}")]
    KeepNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored check-in {id} is corrupt: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
