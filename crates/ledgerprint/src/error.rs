//! Error types for Ledgerprint.

use ledgerprint_core::CoreError;
use ledgerprint_store::StoreError;
use thiserror::Error;

use crate::config::Network;

/// Errors that can occur in the verification service and gateway.
#[derive(Debug, Error)]
pub enum LedgerprintError {
    /// Core error (fingerprint parsing, submission validation).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Network name not recognised.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// No record store configured for the network.
    #[error("no record store configured for network {0}")]
    NetworkNotConfigured(Network),

    /// Payload was not valid base64-encoded UTF-8.
    #[error("invalid data encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for Ledgerprint operations.
pub type Result<T> = std::result::Result<T, LedgerprintError>;
