//! Unsigned 256-bit integers as they appear in proofs and public inputs.

use crate::encoding;
use crate::TypeError;
use std::fmt;
use std::str::FromStr;

/// A 256-bit unsigned integer stored big-endian.
///
/// Byte-wise ordering equals numeric ordering. Displayed in decimal; parsed
/// from decimal or from `0x`-prefixed hex of up to 64 digits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a base-10 string. Leading zeros are allowed.
    pub fn from_dec_str(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidDecimal(s.to_string()));
        }
        let mut out = [0u8; 32];
        for c in s.bytes() {
            let mut carry = (c - b'0') as u16;
            for byte in out.iter_mut().rev() {
                let v = (*byte as u16) * 10 + carry;
                *byte = (v & 0xff) as u8;
                carry = v >> 8;
            }
            if carry != 0 {
                return Err(TypeError::Overflow);
            }
        }
        Ok(Self(out))
    }

    /// Render in base 10.
    pub fn to_dec_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut n = self.0;
        let mut digits = Vec::new();
        while n.iter().any(|&b| b != 0) {
            let mut rem: u16 = 0;
            for byte in n.iter_mut() {
                let v = (rem << 8) | *byte as u16;
                *byte = (v / 10) as u8;
                rem = v % 10;
            }
            digits.push(b'0' + rem as u8);
        }
        digits.iter().rev().map(|&d| char::from(d)).collect()
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_dec_string())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dec_string())
    }
}

impl FromStr for FieldElement {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            encoding::decode_padded::<32>(s).map(Self)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<[u8; 32]> for FieldElement {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(FieldElement, 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_round_trip_small() {
        let v = FieldElement::from_u64(1_234_567);
        assert_eq!(v.to_string(), "1234567");
        assert_eq!("1234567".parse::<FieldElement>().unwrap(), v);
    }

    #[test]
    fn zero_displays_as_zero() {
        assert_eq!(FieldElement::ZERO.to_string(), "0");
        assert!("000".parse::<FieldElement>().unwrap().is_zero());
    }

    #[test]
    fn max_value_parses_and_overflow_rejected() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let v: FieldElement = max.parse().unwrap();
        assert_eq!(v, FieldElement::new([0xff; 32]));
        assert_eq!(v.to_string(), max);

        let over = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert_eq!(over.parse::<FieldElement>().unwrap_err(), TypeError::Overflow);
    }

    #[test]
    fn hex_input_is_accepted() {
        let v: FieldElement = "0xff".parse().unwrap();
        assert_eq!(v, FieldElement::from_u64(255));
    }

    #[test]
    fn rejects_garbage() {
        assert!("12a".parse::<FieldElement>().is_err());
        assert!("".parse::<FieldElement>().is_err());
        assert!("-1".parse::<FieldElement>().is_err());
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(FieldElement::from_u64(2) > FieldElement::from_u64(1));
        assert!(FieldElement::from_u128(u128::MAX) < FieldElement::new([0xff; 32]));
    }

    #[test]
    fn json_is_decimal_string() {
        let v = FieldElement::from_u64(42);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"42\"");
        let back: FieldElement = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(back, v);
    }
}
