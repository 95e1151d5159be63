//! Verification rules.
//!
//! Verification recomputes the fingerprint of a claimed original and compares
//! it to a stored one. Everything here is pure; looking records up is the
//! caller's job.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::hasher::fingerprint;
use crate::record::{Record, RecordAddress};

/// How strictly a claimed original is matched against a record.
///
/// Unaddressed checks can only compare fingerprints. Addressed checks have
/// the stored text at hand and by default require it to equal the claim as
/// well, so a caller cannot pass verification with text that merely collides
/// with the stored fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPolicy {
    /// Require `record.original_text == claimed` in addition to fingerprint
    /// equality for addressed verification.
    pub require_text_match: bool,
}

impl VerificationPolicy {
    /// Fingerprint and text must both match.
    pub const STRICT: Self = Self {
        require_text_match: true,
    };

    /// Fingerprint equality alone is enough.
    pub const FINGERPRINT_ONLY: Self = Self {
        require_text_match: false,
    };
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Result of verifying a claimed original.
///
/// Computed fresh for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    /// Whether a record was found.
    pub exists: bool,
    /// Whether the claim matched the record.
    pub verified: bool,
    /// Fingerprint of the claimed original.
    #[serde(rename = "signature")]
    pub fingerprint: Fingerprint,
    /// Address that was checked, if any.
    #[serde(rename = "recordAddress", skip_serializing_if = "Option::is_none", default)]
    pub address: Option<RecordAddress>,
}

impl VerificationOutcome {
    /// No record at `address`. A legitimate negative result, not an error.
    pub fn missing(claimed: &str, address: Option<RecordAddress>) -> Self {
        Self {
            exists: false,
            verified: false,
            fingerprint: fingerprint(claimed),
            address,
        }
    }
}

/// Recompute the fingerprint of `original` and compare it to `stored`.
pub fn verify(original: &str, stored: &Fingerprint) -> bool {
    fingerprint(original) == *stored
}

/// Verify a claimed original against a record under `policy`.
pub fn verify_against_record(
    record: &Record,
    claimed: &str,
    policy: VerificationPolicy,
) -> VerificationOutcome {
    let computed = fingerprint(claimed);
    let fingerprint_matches = record.fingerprint == computed;
    let text_matches = !policy.require_text_match || record.original_text == claimed;

    VerificationOutcome {
        exists: true,
        verified: fingerprint_matches && text_matches,
        fingerprint: computed,
        address: Some(record.address.clone()),
    }
}
