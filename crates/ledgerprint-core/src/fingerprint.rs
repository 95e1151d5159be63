//! The fingerprint type and its wire encoding.
//!
//! On the wire a fingerprint is always 32 lowercase hex characters: no `0x`
//! prefix, no separators, two zero-padded digits per lane in lane order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Number of byte lanes in a fingerprint.
pub const LANE_COUNT: usize = 16;

/// Length of the hex encoding.
pub const HEX_LEN: usize = LANE_COUNT * 2;

/// A 16-byte content fingerprint.
///
/// Produced by [`crate::fingerprint`]. Immutable once produced; equality is
/// exact byte equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub [u8; LANE_COUNT]);

impl Fingerprint {
    /// The lane state before any byte is absorbed, i.e. the fingerprint of
    /// the empty string.
    pub const INITIAL: Self = Self([
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f,
    ]);

    /// Create from raw lane bytes.
    pub const fn from_bytes(bytes: [u8; LANE_COUNT]) -> Self {
        Self(bytes)
    }

    /// Get the raw lane bytes.
    pub const fn as_bytes(&self) -> &[u8; LANE_COUNT] {
        &self.0
    }

    /// Convert to the 32-character lowercase hex wire format.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the wire format.
    ///
    /// Strict: exactly 32 characters from `[0-9a-f]`. Uppercase digits, a
    /// `0x` prefix or separators are rejected rather than normalised, since
    /// the ledger compares encodings as strings.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        if s.len() != HEX_LEN {
            return Err(CoreError::InvalidFingerprint(format!(
                "expected {HEX_LEN} hex characters, got {}",
                s.len()
            )));
        }
        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(CoreError::InvalidFingerprint(format!(
                "unexpected character {c:?}"
            )));
        }

        let mut bytes = [0u8; LANE_COUNT];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| CoreError::InvalidFingerprint(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; LANE_COUNT]> for Fingerprint {
    fn from(bytes: [u8; LANE_COUNT]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_hex() {
        assert_eq!(Fingerprint::INITIAL.to_hex(), "000102030405060708090a0b0c0d0e0f");
    }

    #[test]
    fn test_hex_is_lowercase_and_zero_padded() {
        let fp = Fingerprint::from_bytes([0xAB, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xF0]);
        assert_eq!(fp.to_hex(), format!("ab01{}f0", "00".repeat(13)));
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let fp = Fingerprint::from_hex("8ecb599e2d753b61a9a2da481cd999e1").unwrap();
        assert_eq!(fp.as_bytes()[0], 0x8e);
        assert_eq!(fp.as_bytes()[15], 0xe1);
        assert_eq!(fp.to_string(), "8ecb599e2d753b61a9a2da481cd999e1");
    }

    #[test]
    fn test_from_hex_rejects_non_canonical() {
        assert!(Fingerprint::from_hex("8ECB599E2D753B61A9A2DA481CD999E1").is_err());
        assert!(Fingerprint::from_hex("0x8ecb599e2d753b61a9a2da481cd999").is_err());
        assert!(Fingerprint::from_hex("8ecb599e2d753b61a9a2da481cd999e").is_err());
        assert!(Fingerprint::from_hex("8ecb599e2d753b61a9a2da481cd999e100").is_err());
        assert!(Fingerprint::from_hex("8ecb599e-d753b61a9a2da481cd999e1").is_err());
        assert!(Fingerprint::from_hex("").is_err());
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let json = serde_json::to_string(&Fingerprint::INITIAL).unwrap();
        assert_eq!(json, "\"000102030405060708090a0b0c0d0e0f\"");

        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Fingerprint::INITIAL);

        assert!(serde_json::from_str::<Fingerprint>("\"not-a-fingerprint\"").is_err());
    }

    #[test]
    fn test_debug() {
        let debug = format!("{:?}", Fingerprint::INITIAL);
        assert_eq!(debug, "Fingerprint(000102030405060708090a0b0c0d0e0f)");
    }
}
