//! The verification service.
//!
//! Combines the pure verification rules with a [`RecordLookup`] to answer
//! "does this text match what the ledger holds?". Stateless: each call is
//! independent and safe to run concurrently.

use serde::Serialize;
use tracing::{debug, info};

use ledgerprint_core::{
    fingerprint, verify, verify_against_record, Fingerprint, Record, RecordAddress,
    VerificationOutcome, VerificationPolicy,
};
use ledgerprint_store::RecordLookup;

use crate::error::Result;

/// A stored record together with the fingerprint re-derived from its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInspection {
    #[serde(flatten)]
    pub record: Record,
    /// Fingerprint recomputed from `record.original_text`.
    #[serde(rename = "expectedHash")]
    pub expected: Fingerprint,
    /// Whether the stored fingerprint matches the recomputed one.
    pub verified: bool,
}

/// Result of checking a claimed original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// An address was supplied and the record (or its absence) was checked.
    Addressed(VerificationOutcome),
    /// No address: existence cannot be checked, only the fingerprint reported.
    Unaddressed { fingerprint: Fingerprint },
}

/// Verification service over a record lookup capability.
pub struct Verifier<L: RecordLookup> {
    lookup: L,
    policy: VerificationPolicy,
}

impl<L: RecordLookup> Verifier<L> {
    /// Create a verifier.
    pub fn new(lookup: L, policy: VerificationPolicy) -> Self {
        Self { lookup, policy }
    }

    pub fn policy(&self) -> VerificationPolicy {
        self.policy
    }

    /// Get the lookup reference.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Whether a record exists at `address`.
    pub async fn exists(&self, address: &RecordAddress) -> Result<bool> {
        Ok(self.lookup.lookup(address).await?.is_some())
    }

    /// Compare `original` against a fingerprint the caller already holds.
    pub fn verify(&self, original: &str, stored: &Fingerprint) -> bool {
        verify(original, stored)
    }

    /// Verify `claimed` against the record at `address`.
    ///
    /// A missing record is a negative outcome, not an error.
    pub async fn verify_at(
        &self,
        address: &RecordAddress,
        claimed: &str,
    ) -> Result<VerificationOutcome> {
        let outcome = match self.lookup.lookup(address).await? {
            Some(record) => verify_against_record(&record, claimed, self.policy),
            None => VerificationOutcome::missing(claimed, Some(address.clone())),
        };

        info!(
            %address,
            exists = outcome.exists,
            verified = outcome.verified,
            require_text_match = self.policy.require_text_match,
            "verified claim against record"
        );
        Ok(outcome)
    }

    /// Fetch the record at `address` and check it against itself.
    ///
    /// The stored text is the only original available here, so the check is
    /// fingerprint equality: it detects a record whose text or fingerprint was
    /// altered after anchoring.
    pub async fn inspect(&self, address: &RecordAddress) -> Result<Option<RecordInspection>> {
        let Some(record) = self.lookup.lookup(address).await? else {
            debug!(%address, "no record to inspect");
            return Ok(None);
        };

        let expected = fingerprint(&record.original_text);
        let verified = expected == record.fingerprint;
        info!(%address, verified, "inspected record");

        Ok(Some(RecordInspection {
            record,
            expected,
            verified,
        }))
    }

    /// Check a claimed original, against a record when an address is given.
    ///
    /// Without an address there is nothing to look up; the caller gets the
    /// fingerprint to compare or submit themselves.
    pub async fn verify_claim(
        &self,
        claimed: &str,
        address: Option<&RecordAddress>,
    ) -> Result<ClaimOutcome> {
        match address {
            Some(address) => Ok(ClaimOutcome::Addressed(
                self.verify_at(address, claimed).await?,
            )),
            None => {
                let fingerprint = fingerprint(claimed);
                debug!(%fingerprint, "unaddressed claim, returning fingerprint only");
                Ok(ClaimOutcome::Unaddressed { fingerprint })
            }
        }
    }
}
