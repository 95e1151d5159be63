//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ledgerprint_core::{fingerprint, Fingerprint, Record, RecordAddress, MAX_TEXT_LEN};

/// Generate text the ledger accepts: non-empty, at most 200 bytes.
///
/// Mixes printable ASCII (one byte per char) with arbitrary non-control
/// Unicode capped at 50 chars, so the byte limit holds either way.
pub fn ledger_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{1,200}".prop_map(String::from),
        "\\PC{1,50}".prop_map(String::from),
    ]
}

/// Generate short ASCII text, useful where many distinct values are needed.
pub fn short_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,16}".prop_map(String::from)
}

/// Generate text one or more bytes over the ledger's limit.
pub fn oversized_text() -> impl Strategy<Value = String> {
    prop::collection::vec(b'a'..=b'z', MAX_TEXT_LEN + 1..=MAX_TEXT_LEN * 2)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Generate a random Fingerprint.
pub fn fingerprint_value() -> impl Strategy<Value = Fingerprint> {
    any::<[u8; 16]>().prop_map(Fingerprint::from_bytes)
}

/// Generate a random RecordAddress.
pub fn record_address() -> impl Strategy<Value = RecordAddress> {
    any::<[u8; 32]>().prop_map(|bytes| RecordAddress(hex::encode(bytes)))
}

/// Generate a reasonable timestamp (Unix seconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_000_000_000i64
}

/// Parameters for generating a record.
#[derive(Debug, Clone)]
pub struct RecordParams {
    pub text: String,
    pub address: RecordAddress,
    pub owner: String,
    pub timestamp: i64,
    /// Fingerprint to store instead of the genuine one.
    pub forged: Option<Fingerprint>,
}

impl Arbitrary for RecordParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            ledger_text(),
            record_address(),
            "[1-9A-HJ-NP-Za-km-z]{32,44}", // base58 owner
            timestamp(),
            prop::option::weighted(0.2, fingerprint_value()),
        )
            .prop_map(|(text, address, owner, timestamp, forged)| RecordParams {
                text,
                address,
                owner,
                timestamp,
                forged,
            })
            .boxed()
    }
}

/// Build a record from parameters.
pub fn record_from_params(params: &RecordParams) -> Record {
    Record {
        original_text: params.text.clone(),
        fingerprint: params.forged.unwrap_or_else(|| fingerprint(&params.text)),
        address: params.address.clone(),
        owner: params.owner.clone(),
        timestamp: params.timestamp,
        cost_lamports: ledgerprint_core::anchoring_cost_lamports(),
    }
}
