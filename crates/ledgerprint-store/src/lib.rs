//! # Ledgerprint Store
//!
//! The record store capability. The ledger that persists records lives outside
//! Ledgerprint; this crate describes what Ledgerprint needs from it and ships
//! two implementations.
//!
//! ## Key Types
//!
//! - [`RecordLookup`] - Fetch a record by address (all verification needs)
//! - [`RecordStore`] - Lookup plus submission and health probing
//! - [`MemoryLedger`] - In-memory ledger with the program's semantics, for tests
//! - [`HttpLedger`] - Client for the ledger node service
//!
//! ## Usage
//!
//! ```rust
//! use ledgerprint_store::{MemoryLedger, RecordLookup, RecordStore};
//!
//! async fn example() {
//!     let ledger = MemoryLedger::new();
//!     let anchored = ledger.submit("Hello Devnet").await.unwrap();
//!     let record = ledger.lookup(&anchored.address).await.unwrap();
//!     assert!(record.is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Missing is not an error**: `lookup` returns `Ok(None)` for unknown addresses
//! - **No retries**: a refused submission is reported once, verbatim
//! - **Immutable records**: nothing here edits a record after creation

pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use http::{HttpLedger, LedgerTimeouts};
pub use memory::MemoryLedger;
pub use traits::{Anchored, LedgerHealth, RecordLookup, RecordStore};
