//! # Ledgerprint
//!
//! Content fingerprinting and verification for text anchored on an external,
//! append-only ledger.
//!
//! ## Overview
//!
//! - **Fingerprint**: a 16-byte tag computed identically here and by the
//!   ledger program, rendered as 32 lowercase hex characters
//! - **Submission**: text is fingerprinted and handed to the ledger for anchoring
//! - **Verification**: a record is fetched back and its fingerprint re-derived
//!   from the claimed original to detect corruption or forgery
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledgerprint::{Verifier, VerificationPolicy};
//! use ledgerprint::store::{MemoryLedger, RecordStore};
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new();
//!     let anchored = ledger.submit("Hello Devnet").await.unwrap();
//!
//!     let verifier = Verifier::new(ledger, VerificationPolicy::default());
//!     let outcome = verifier
//!         .verify_at(&anchored.address, "Hello Devnet")
//!         .await
//!         .unwrap();
//!     assert!(outcome.verified);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `ledgerprint::core` - Fingerprint, hasher, records, pure verification
//! - `ledgerprint::store` - Record store traits and implementations

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod verifier;

// Re-export component crates
pub use ledgerprint_core as core;
pub use ledgerprint_store as store;

pub use config::{GatewayConfig, Network, NetworkConfig};
pub use envelope::{ApiResponse, Reply};
pub use error::{LedgerprintError, Result};
pub use gateway::{Gateway, StoreRequest, VerifyRequest};
pub use verifier::{ClaimOutcome, RecordInspection, Verifier};

// Re-export commonly used core types
pub use ledgerprint_core::{
    fingerprint, verify, Fingerprint, Record, RecordAddress, VerificationOutcome,
    VerificationPolicy,
};
