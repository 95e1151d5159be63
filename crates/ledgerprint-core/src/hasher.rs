//! The fingerprint hasher.
//!
//! An FNV-1a 64-bit multiply-xor core drives updates to 16 byte lanes. For
//! each input byte `b`:
//!
//! 1. `acc ^= b`, then `acc = acc * FNV_PRIME` (wrapping, mod 2^64)
//! 2. `idx = acc % 16`, and lane `idx` gains `b` (wrapping, mod 256)
//! 3. lanes `idx+1`, `idx+3`, `idx+7` (mod 16) are xored with accumulator
//!    bits 8..16, 16..24 and 24..32 respectively
//!
//! Lanes start at `0x00..=0x0f` and the accumulator at the FNV-1a offset
//! basis. The output is the lane array in index order.
//!
//! This is an interop contract, not a cryptographic hash. It offers no
//! collision resistance.

use crate::fingerprint::{Fingerprint, LANE_COUNT};

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Lane offsets (relative to the updated lane) that receive accumulator bits,
/// paired with the shift that selects which accumulator byte they receive.
const DIFFUSION: [(usize, u32); 3] = [(1, 8), (3, 16), (7, 24)];

/// Incremental fingerprint computation.
///
/// Feeding the input in several [`update`](Self::update) calls yields the
/// same fingerprint as a single call over the concatenation.
///
/// ```
/// use ledgerprint_core::{fingerprint, Fingerprinter};
///
/// let mut hasher = Fingerprinter::new();
/// hasher.update(b"Hello ");
/// hasher.update(b"Devnet");
/// assert_eq!(hasher.finish(), fingerprint("Hello Devnet"));
/// ```
#[derive(Clone)]
pub struct Fingerprinter {
    lanes: [u8; LANE_COUNT],
    acc: u64,
}

impl Fingerprinter {
    /// Start a new computation at the initial lane state.
    pub const fn new() -> Self {
        Self {
            lanes: Fingerprint::INITIAL.0,
            acc: FNV_OFFSET_BASIS,
        }
    }

    /// Absorb bytes, strictly in order.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.absorb(byte);
        }
    }

    /// Finish and return the fingerprint.
    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.lanes)
    }

    fn absorb(&mut self, byte: u8) {
        self.acc ^= u64::from(byte);
        self.acc = self.acc.wrapping_mul(FNV_PRIME);

        let idx = (self.acc % LANE_COUNT as u64) as usize;
        self.lanes[idx] = self.lanes[idx].wrapping_add(byte);

        for (offset, shift) in DIFFUSION {
            self.lanes[(idx + offset) % LANE_COUNT] ^= (self.acc >> shift) as u8;
        }
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

// The accumulator is internal state; keep it out of debug output.
impl std::fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fingerprinter").finish_non_exhaustive()
    }
}

/// Fingerprint a text string over its UTF-8 bytes.
///
/// Total: every string, including the empty string, has a fingerprint.
pub fn fingerprint(text: &str) -> Fingerprint {
    fingerprint_bytes(text.as_bytes())
}

/// Fingerprint a raw byte sequence.
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = Fingerprinter::new();
    hasher.update(data);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_is_initial_state() {
        assert_eq!(fingerprint("").to_hex(), "000102030405060708090a0b0c0d0e0f");
        assert_eq!(fingerprint(""), Fingerprint::INITIAL);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(fingerprint("a").to_hex(), "000102850405060708090a0b6de10e0e");
        assert_eq!(fingerprint("hello").to_hex(), "00e28203042ad7fbf3f50b7ab1e75e86");
        assert_eq!(fingerprint("Hello Devnet").to_hex(), "8ecb599e2d753b61a9a2da481cd999e1");
    }

    #[test]
    fn test_multibyte_utf8_is_hashed_as_bytes() {
        assert_eq!(fingerprint("日本語"), fingerprint_bytes("日本語".as_bytes()));
        assert_eq!(fingerprint("🦀").to_hex(), "81c5a64b04250037084b0a0b0c780eff");
    }

    #[test]
    fn test_single_byte_touches_four_lanes() {
        // Regression guard for the diffusion step: without it a single byte
        // could only ever move one lane.
        let fp = fingerprint("a");
        let changed = fp
            .as_bytes()
            .iter()
            .zip(Fingerprint::INITIAL.as_bytes())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 4, "one byte changed {changed} lanes");
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(fingerprint("Hello Devnet"), fingerprint("Hello devnet"));
    }

    #[test]
    fn test_every_single_character_edit_changes_output() {
        let seed: Vec<char> = "Hello Devnet".chars().collect();
        let original = fingerprint("Hello Devnet");
        let printable = (' '..='~').collect::<Vec<char>>();
        let mut edits = 0;

        for i in 0..=seed.len() {
            for &c in &printable {
                let mut inserted = seed.clone();
                inserted.insert(i, c);
                let inserted: String = inserted.into_iter().collect();
                assert_ne!(fingerprint(&inserted), original, "insert {c:?} at {i}");
                edits += 1;

                if i < seed.len() && seed[i] != c {
                    let mut substituted = seed.clone();
                    substituted[i] = c;
                    let substituted: String = substituted.into_iter().collect();
                    assert_ne!(fingerprint(&substituted), original, "substitute {c:?} at {i}");
                    edits += 1;
                }
            }

            if i < seed.len() {
                let mut deleted = seed.clone();
                deleted.remove(i);
                let deleted: String = deleted.into_iter().collect();
                assert_ne!(fingerprint(&deleted), original, "delete at {i}");
                edits += 1;
            }
        }

        // 13 insertion points and 12 substitution and deletion points over 95 printable chars.
        assert_eq!(edits, 13 * 95 + 12 * 94 + 12);
    }

    proptest! {
        #[test]
        fn test_deterministic(s in ".*") {
            prop_assert_eq!(fingerprint(&s), fingerprint(&s));
        }

        #[test]
        fn test_fixed_width_lowercase_hex(s in ".*") {
            let hex = fingerprint(&s).to_hex();
            prop_assert_eq!(hex.len(), 32);
            prop_assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }

        #[test]
        fn test_chunking_does_not_matter(data in prop::collection::vec(any::<u8>(), 0..256), split in any::<prop::sample::Index>()) {
            let at = split.index(data.len() + 1);
            let mut hasher = Fingerprinter::new();
            hasher.update(&data[..at]);
            hasher.update(&data[at..]);
            prop_assert_eq!(hasher.finish(), fingerprint_bytes(&data));
        }
    }
}
