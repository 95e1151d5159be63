//! Ledger records.
//!
//! A record is created and owned by the external ledger. Ledgerprint only
//! reads records to verify them; nothing here mutates one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fingerprint::Fingerprint;

/// Maximum original text length accepted by the ledger program, in UTF-8 bytes.
pub const MAX_TEXT_LEN: usize = 200;

/// On-ledger account size of one record, in bytes.
///
/// 8 discriminator + (4 + 200) string + 16 fingerprint + 8 timestamp
/// + 32 owner + 8 cost.
pub const RECORD_SPACE: u64 = 8 + 4 + MAX_TEXT_LEN as u64 + 16 + 8 + 32 + 8;

/// Flat fee the ledger charges per submission, in lamports.
pub const TRANSACTION_FEE_LAMPORTS: u64 = 5_000;

/// Lamports per SOL, for reporting decimal costs.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;
const LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;
const EXEMPTION_THRESHOLD_YEARS: u64 = 2;

/// Rent-exempt deposit for one record account.
pub const fn rent_exemption_lamports() -> u64 {
    (RECORD_SPACE + ACCOUNT_STORAGE_OVERHEAD) * LAMPORTS_PER_BYTE_YEAR * EXEMPTION_THRESHOLD_YEARS
}

/// Total cost the ledger records for anchoring one string.
pub const fn anchoring_cost_lamports() -> u64 {
    rent_exemption_lamports() + TRANSACTION_FEE_LAMPORTS
}

/// Opaque address of a record on the ledger.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAddress(pub String);

impl RecordAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordAddress({})", self.0)
    }
}

impl fmt::Display for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A record as persisted by the ledger.
///
/// Field names on the wire follow the ledger node's JSON (`originalString`,
/// `signature`, `recordAddress`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// The anchored text.
    #[serde(rename = "originalString")]
    pub original_text: String,
    /// Fingerprint stored alongside the text at submission time.
    #[serde(rename = "signature")]
    pub fingerprint: Fingerprint,
    /// Where the record lives.
    #[serde(rename = "recordAddress")]
    pub address: RecordAddress,
    /// Account that paid for the record.
    pub owner: String,
    /// Unix timestamp (seconds) when the record was created.
    pub timestamp: i64,
    /// What the submission cost.
    pub cost_lamports: u64,
}

impl Record {
    /// Cost in SOL.
    pub fn cost_sol(&self) -> f64 {
        self.cost_lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}
