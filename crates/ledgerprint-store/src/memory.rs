//! In-memory ledger.
//!
//! Mirrors the ledger program's behaviour (validation, duplicate refusal, cost
//! accounting, fingerprinting with the shared hasher) without persistence or
//! network access. All data is lost when the ledger is dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use ledgerprint_core::{
    anchoring_cost_lamports, fingerprint, validate_submission, Record, RecordAddress,
};

use crate::error::{Result, StoreError};
use crate::traits::{Anchored, LedgerHealth, RecordLookup, RecordStore};

/// Owner reported for records when none is configured.
pub const DEFAULT_OWNER: &str = "memory-ledger-payer";

/// In-memory ledger implementation. Thread-safe via RwLock.
pub struct MemoryLedger {
    inner: RwLock<MemoryLedgerInner>,
    owner: String,
    offline: AtomicBool,
}

#[derive(Default)]
struct MemoryLedgerInner {
    /// Records indexed by address.
    records: HashMap<RecordAddress, Record>,

    /// Text -> address, for duplicate detection.
    by_text: HashMap<String, RecordAddress>,
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::with_owner(DEFAULT_OWNER)
    }

    /// Create a ledger that reports `owner` as the payer of every record.
    pub fn with_owner(owner: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(MemoryLedgerInner::default()),
            owner: owner.into(),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the ledger becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Place an arbitrary record on the ledger, bypassing submission.
    ///
    /// Used to stage records that the program itself would never produce,
    /// such as tampered or colliding ones. Refuses to replace an existing
    /// record.
    pub fn insert_record(&self, record: Record) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.records.contains_key(&record.address) {
            return Err(StoreError::AlreadyExists {
                address: record.address,
            });
        }

        inner
            .by_text
            .entry(record.original_text.clone())
            .or_insert_with(|| record.address.clone());
        inner.records.insert(record.address.clone(), record);
        Ok(())
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory ledger is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordLookup for MemoryLedger {
    async fn lookup(&self, address: &RecordAddress) -> Result<Option<Record>> {
        self.ensure_online()?;

        let record = self.inner.read().records.get(address).cloned();
        debug!(%address, found = record.is_some(), "memory ledger lookup");
        Ok(record)
    }
}

#[async_trait]
impl RecordStore for MemoryLedger {
    async fn submit(&self, text: &str) -> Result<Anchored> {
        self.ensure_online()?;
        validate_submission(text)?;

        let mut inner = self.inner.write();

        if let Some(existing) = inner.by_text.get(text) {
            return Err(StoreError::AlreadyExists {
                address: existing.clone(),
            });
        }

        let address = new_address();
        let record = Record {
            original_text: text.to_string(),
            fingerprint: fingerprint(text),
            address: address.clone(),
            owner: self.owner.clone(),
            timestamp: now_secs(),
            cost_lamports: anchoring_cost_lamports(),
        };

        let anchored = Anchored {
            address: address.clone(),
            fingerprint: record.fingerprint,
            cost_lamports: record.cost_lamports,
            transaction_signature: None,
        };

        inner.by_text.insert(record.original_text.clone(), address.clone());
        inner.records.insert(address, record);

        info!(
            address = %anchored.address,
            fingerprint = %anchored.fingerprint,
            "anchored text in memory ledger"
        );
        Ok(anchored)
    }

    async fn find_by_text(&self, text: &str) -> Result<Option<Record>> {
        self.ensure_online()?;

        let inner = self.inner.read();
        let record = inner
            .by_text
            .get(text)
            .and_then(|address| inner.records.get(address))
            .cloned();
        debug!(found = record.is_some(), "memory ledger text query");
        Ok(record)
    }

    async fn health(&self) -> Result<LedgerHealth> {
        self.ensure_online()?;
        Ok(LedgerHealth {
            status: "healthy".to_string(),
            network: Some("memory".to_string()),
            program_id: None,
            payer: Some(self.owner.clone()),
        })
    }
}

/// Fresh random 32-byte address, hex-encoded.
fn new_address() -> RecordAddress {
    let bytes: [u8; 32] = rand::random();
    RecordAddress(hex::encode(bytes))
}

/// Current time in Unix seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
