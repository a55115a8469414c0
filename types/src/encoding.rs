//! Hex encoding for the fixed-width byte types.
//!
//! Human-readable serializers (JSON, TOML) see `0x`-prefixed strings; binary
//! serializers (bincode) see the raw byte array.

use crate::TypeError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub(crate) fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode an optionally `0x`-prefixed hex string of exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], TypeError> {
    let digits = strip_prefix(s);
    if digits.len() % 2 != 0 {
        return Err(TypeError::InvalidHex(s.to_string()));
    }
    if digits.len() != N * 2 {
        return Err(TypeError::InvalidLength {
            expected: N,
            actual: digits.len() / 2,
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|_| TypeError::InvalidHex(s.to_string()))?;
    Ok(out)
}

/// Decode a hex string of at most `N` bytes, left-padding with zeros.
pub(crate) fn decode_padded<const N: usize>(s: &str) -> Result<[u8; N], TypeError> {
    let digits = strip_prefix(s);
    if digits.is_empty() || digits.len() > N * 2 {
        return Err(TypeError::InvalidHex(s.to_string()));
    }
    let width = N * 2;
    let padded = format!("{digits:0>width$}");
    let mut out = [0u8; N];
    hex::decode_to_slice(padded, &mut out).map_err(|_| TypeError::InvalidHex(s.to_string()))?;
    Ok(out)
}

/// Implements serde for a newtype over `[u8; $len]` that also implements
/// `Display` and `FromStr`.
macro_rules! impl_hex_serde {
    ($ty:ident, $len:expr) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    serde::Serialize::serialize(&self.0, serializer)
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                } else {
                    let bytes = <[u8; $len] as serde::Deserialize>::deserialize(deserializer)?;
                    Ok(Self(bytes))
                }
            }
        }
    };
}
