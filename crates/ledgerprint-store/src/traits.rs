//! Store traits: the abstract interface to the external ledger.
//!
//! Verification only needs [`RecordLookup`]. The gateway additionally submits
//! text and probes health through [`RecordStore`].

use std::sync::Arc;

use async_trait::async_trait;
use ledgerprint_core::{Fingerprint, Record, RecordAddress};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the ledger reports back after anchoring a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchored {
    /// Address of the new record.
    #[serde(rename = "recordAddress")]
    pub address: RecordAddress,
    /// Fingerprint the ledger stored.
    #[serde(rename = "signature")]
    pub fingerprint: Fingerprint,
    /// Cost of the submission.
    pub cost_lamports: u64,
    /// Ledger transaction that created the record, when the store reports one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transaction_signature: Option<String>,
}

/// Health as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub program_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payer: Option<String>,
}

/// Read access to ledger records.
///
/// The only suspension point in verification. Callers that need timeouts
/// apply them around this call.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Fetch the record at `address`.
    ///
    /// Returns `Ok(None)` when no record exists there.
    async fn lookup(&self, address: &RecordAddress) -> Result<Option<Record>>;
}

/// Full access to the ledger: lookup, submission and health.
#[async_trait]
pub trait RecordStore: RecordLookup {
    /// Anchor `text` on the ledger.
    ///
    /// # Returns
    /// - `Anchored` with the new record's address and stored fingerprint.
    /// - `StoreError::AlreadyExists` or `StoreError::Rejected` if the ledger
    ///   refused it. Refusals are never retried.
    async fn submit(&self, text: &str) -> Result<Anchored>;

    /// Find the record anchoring exactly `text`, if any.
    ///
    /// Lets callers check existence without knowing the record's address.
    async fn find_by_text(&self, text: &str) -> Result<Option<Record>>;

    /// Probe the store.
    async fn health(&self) -> Result<LedgerHealth>;
}

#[async_trait]
impl<T: RecordLookup + ?Sized> RecordLookup for Arc<T> {
    async fn lookup(&self, address: &RecordAddress) -> Result<Option<Record>> {
        (**self).lookup(address).await
    }
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn submit(&self, text: &str) -> Result<Anchored> {
        (**self).submit(text).await
    }

    async fn find_by_text(&self, text: &str) -> Result<Option<Record>> {
        (**self).find_by_text(text).await
    }

    async fn health(&self) -> Result<LedgerHealth> {
        (**self).health().await
    }
}
