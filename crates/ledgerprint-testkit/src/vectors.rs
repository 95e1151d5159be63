//! Golden test vectors for cross-implementation conformance.
//!
//! Every implementation of the hasher, in any language, must produce exactly
//! these fingerprints. The ledger program computes the same function
//! independently, so a mismatch here means submitted records will not verify.

use ledgerprint_core::{fingerprint_bytes, Fingerprint};
use serde::Serialize;

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input bytes (UTF-8 text unless the name says otherwise).
    #[serde(serialize_with = "hex_bytes")]
    pub input: &'static [u8],
    /// Expected fingerprint (hex).
    pub expected: &'static str,
}

fn hex_bytes<S: serde::Serializer>(bytes: &&'static [u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

const ALL_BYTES: [u8; 256] = {
    let mut bytes = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        bytes[i] = i as u8;
        i += 1;
    }
    bytes
};

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty",
            input: b"",
            expected: "000102030405060708090a0b0c0d0e0f",
        },
        GoldenVector {
            name: "single lowercase letter",
            input: b"a",
            expected: "000102850405060708090a0b6de10e0e",
        },
        GoldenVector {
            name: "single uppercase letter",
            input: b"A",
            expected: "000102850405060708090a0b4d2f0e0d",
        },
        GoldenVector {
            name: "single uppercase letter B",
            input: b"B",
            expected: "0001020304472e070a090a0b8a0d0e0f",
        },
        GoldenVector {
            name: "single NUL byte",
            input: b"\x00",
            expected: "b70103030405800708090a0b0c0d0e0f",
        },
        GoldenVector {
            name: "order matters (ab)",
            input: b"ab",
            expected: "00b402850405060708096c936da40e0e",
        },
        GoldenVector {
            name: "order matters (ba)",
            input: b"ba",
            expected: "000102b60467f70709090a0bebdd0e42",
        },
        GoldenVector {
            name: "hello",
            input: b"hello",
            expected: "00e28203042ad7fbf3f50b7ab1e75e86",
        },
        GoldenVector {
            name: "devnet scenario",
            input: b"Hello Devnet",
            expected: "8ecb599e2d753b61a9a2da481cd999e1",
        },
        GoldenVector {
            name: "devnet scenario, case changed",
            input: b"Hello devnet",
            expected: "57a7592a57c61361bcd9f003aed999f1",
        },
        GoldenVector {
            name: "sdk demo string",
            input: b"Hello Solana from Python SDK!",
            expected: "a704d99ea544b04d268d93c82642a547",
        },
        GoldenVector {
            name: "pangram",
            input: b"The quick brown fox jumps over the lazy dog",
            expected: "a70b4fb9b887f090eb29ee8f6cfe9f89",
        },
        GoldenVector {
            name: "latin-1 accents (utf-8)",
            input: "héllo wörld".as_bytes(),
            expected: "99a2a21304717d1cb5571e1b87ce884f",
        },
        GoldenVector {
            name: "cjk (utf-8)",
            input: "日本語".as_bytes(),
            expected: "174957add705f441f7ef4149d95e6b0f",
        },
        GoldenVector {
            name: "emoji (utf-8, 4 bytes)",
            input: "🦀".as_bytes(),
            expected: "81c5a64b04250037084b0a0b0c780eff",
        },
        GoldenVector {
            name: "maximum ledger length",
            input: &[b'x'; 200],
            expected: "f401eb03a475fb779309cb0bc57ddb7f",
        },
        GoldenVector {
            name: "all byte values (binary)",
            input: &ALL_BYTES,
            expected: "55a6128c132a29cd1f883d1fc83dcbfc",
        },
    ]
}

/// Strings that must all fingerprint differently from each other.
///
/// Short near-misses: transpositions, case flips, whitespace, and the
/// literal hex of another input's fingerprint.
pub fn adversarial_corpus() -> Vec<&'static str> {
    vec![
        "", " ", "  ", "\t", "\n", "0", "00", "1", "01", "10", "a", "b", "A", "B", "aa",
        "aaa", "aaaa", "ab", "ba", "abc", "acb", "test", "Test", "tset", "password",
        "Password", "12345678", "87654321", "Hello Devnet", "Hello devnet",
        "000102030405060708090a0b0c0d0e0f",
    ]
}

/// Verify all golden vectors against this implementation.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = fingerprint_bytes(v.input).to_hex();
            (v.name.to_string(), actual == v.expected, actual)
        })
        .collect()
}

/// Parse a vector's expected value.
pub fn expected_fingerprint(vector: &GoldenVector) -> Fingerprint {
    Fingerprint::from_hex(vector.expected).unwrap_or(Fingerprint::INITIAL)
}
