//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an in-memory ledger shared with
//! whatever verifier or gateway the test builds on top of it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ledgerprint::{Gateway, GatewayConfig, Network, Verifier};
use ledgerprint_core::{
    anchoring_cost_lamports, fingerprint, Fingerprint, Record, RecordAddress, VerificationPolicy,
};
use ledgerprint_store::{Anchored, MemoryLedger, RecordStore};

/// A test fixture around a shared memory ledger.
pub struct TestFixture {
    pub ledger: Arc<MemoryLedger>,
}

impl TestFixture {
    /// Create a new fixture with an empty ledger.
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MemoryLedger::new()),
        }
    }

    /// Create a fixture whose ledger reports `owner` as payer.
    pub fn with_owner(owner: &str) -> Self {
        Self {
            ledger: Arc::new(MemoryLedger::with_owner(owner)),
        }
    }

    /// Anchor `text` through the normal submission path.
    pub async fn anchor(&self, text: &str) -> ledgerprint_store::Result<Anchored> {
        self.ledger.submit(text).await
    }

    /// Anchor every string in `texts`, returning their addresses in order.
    pub async fn anchor_all(&self, texts: &[&str]) -> ledgerprint_store::Result<Vec<RecordAddress>> {
        let mut addresses = Vec::with_capacity(texts.len());
        for text in texts {
            addresses.push(self.anchor(text).await?.address);
        }
        Ok(addresses)
    }

    /// Stage a record holding `stored_text` with an arbitrary stored fingerprint.
    pub fn stage_forged(&self, stored_text: &str, stored: Fingerprint) -> RecordAddress {
        let address = fresh_address();
        let record = Record {
            original_text: stored_text.to_string(),
            fingerprint: stored,
            address: address.clone(),
            owner: "forger".to_string(),
            timestamp: 0,
            cost_lamports: anchoring_cost_lamports(),
        };
        self.ledger
            .insert_record(record)
            .expect("fresh address is never occupied");
        address
    }

    /// Stage a record anchored for `original` whose text was later replaced
    /// with `altered`. The stored fingerprint is the genuine one for `original`.
    pub fn stage_tampered(&self, original: &str, altered: &str) -> RecordAddress {
        self.stage_forged(altered, fingerprint(original))
    }

    /// Stage a record holding `stored_text` but carrying the fingerprint of
    /// `claimed`, as if the two texts collided.
    pub fn stage_collision(&self, stored_text: &str, claimed: &str) -> RecordAddress {
        self.stage_forged(stored_text, fingerprint(claimed))
    }

    /// Verifier over this fixture's ledger.
    pub fn verifier(&self, policy: VerificationPolicy) -> Verifier<Arc<MemoryLedger>> {
        Verifier::new(Arc::clone(&self.ledger), policy)
    }

    /// Gateway serving this fixture's ledger on every network.
    pub fn gateway(&self, config: GatewayConfig) -> Gateway<Arc<MemoryLedger>> {
        Network::ALL
            .iter()
            .fold(Gateway::new(config), |gateway, network| {
                gateway.with_ledger(*network, Arc::clone(&self.ledger))
            })
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An address that no submission will produce.
fn fresh_address() -> RecordAddress {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    let id = NEXT.fetch_add(1, Ordering::Relaxed);
    RecordAddress(format!("staged-{}", hex::encode(id.to_be_bytes())))
}
