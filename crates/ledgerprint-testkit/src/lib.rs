//! # Ledgerprint Testkit
//!
//! Testing utilities for Ledgerprint.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected fingerprints, the conformance
//!   set every reimplementation of the hasher must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready-made in-memory ledger with helpers for staging
//!   genuine, tampered and colliding records
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ledgerprint_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! for (name, ok, hex) in verify_all_vectors() {
//!     assert!(ok, "{name} produced {hex}");
//! }
//! assert!(!all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ledgerprint_testkit::generators::ledger_text;
//!
//! proptest! {
//!     #[test]
//!     fn fingerprint_is_deterministic(text in ledger_text()) {
//!         prop_assert_eq!(ledgerprint::fingerprint(&text), ledgerprint::fingerprint(&text));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ledgerprint_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let address = fixture.stage_collision("A", "B");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{ledger_text, record_from_params, RecordParams};
pub use vectors::{adversarial_corpus, all_vectors, verify_all_vectors, GoldenVector};
