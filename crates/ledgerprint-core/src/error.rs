//! Error types for Ledgerprint Core.

use thiserror::Error;

/// Errors from parsing fingerprints and validating submissions.
///
/// Hashing and verification themselves are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid fingerprint encoding: {0}")]
    InvalidFingerprint(String),

    #[error("text must not be empty")]
    EmptyText,

    #[error("text is {0} bytes, exceeding the {} byte limit", crate::record::MAX_TEXT_LEN)]
    TextTooLong(usize),
}
