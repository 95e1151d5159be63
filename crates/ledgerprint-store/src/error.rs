//! Error types for the store module.

use ledgerprint_core::{CoreError, RecordAddress};
use thiserror::Error;

/// Errors that can occur talking to a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The submission was refused before reaching the ledger.
    #[error("invalid submission: {0}")]
    Validation(#[from] CoreError),

    /// The text is already anchored. Duplicate submissions are refused.
    #[error("text already anchored at {address}; duplicate submissions are refused")]
    AlreadyExists { address: RecordAddress },

    /// The store refused the request; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The store could not be reached or timed out.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with something that is not a valid record.
    #[error("invalid data from record store: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
