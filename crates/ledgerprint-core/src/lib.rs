//! # Ledgerprint Core
//!
//! Pure primitives for Ledgerprint: the content fingerprint, ledger records,
//! and the verification rules that compare them.
//!
//! This crate contains no I/O, no storage, no networking. Every function is
//! deterministic and safe to call from any number of threads.
//!
//! ## Key Types
//!
//! - [`Fingerprint`] - 16-byte tamper-evidence tag, 32 lowercase hex chars on the wire
//! - [`Fingerprinter`] - Incremental form of the hasher
//! - [`Record`] - A ledger record observed read-only for verification
//! - [`VerificationOutcome`] - Result of checking a claimed original against a record
//!
//! ## Interop
//!
//! The hasher is a wire contract with the on-ledger program, which computes the
//! same function independently. See the [`hasher`] module for the exact steps.

pub mod error;
pub mod fingerprint;
pub mod hasher;
pub mod record;
pub mod validation;
pub mod verify;

pub use error::CoreError;
pub use fingerprint::Fingerprint;
pub use hasher::{fingerprint, fingerprint_bytes, Fingerprinter};
pub use record::{anchoring_cost_lamports, Record, RecordAddress, MAX_TEXT_LEN};
pub use validation::validate_submission;
pub use verify::{verify, verify_against_record, VerificationOutcome, VerificationPolicy};
