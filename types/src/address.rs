//! Account address type.

use crate::encoding;
use crate::TypeError;
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address, displayed as `0x` + 40 hex digits.
///
/// Derived from the account's public key (see `zkid_crypto::derive_address`).
/// The address is the implicit primary key of every identity record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountAddress([u8; 20]);

impl AccountAddress {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The zero address is never a valid owner or caller.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress(0x{})", encoding::encode(&self.0[..4]))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encoding::encode(&self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encoding::decode_fixed::<20>(s).map(Self)
    }
}

impl From<[u8; 20]> for AccountAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(AccountAddress, 20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_round_trip() {
        let addr = AccountAddress::new([0x4c; 20]);
        let s = addr.to_string();
        assert_eq!(s.len(), 42);
        assert!(s.starts_with("0x"));
        assert_eq!(s.parse::<AccountAddress>().unwrap(), addr);
    }

    #[test]
    fn parse_rejects_short_input() {
        assert!("0x4cbe046e".parse::<AccountAddress>().is_err());
    }

    #[test]
    fn json_uses_hex_string() {
        let addr = AccountAddress::new([1u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn zero_address() {
        assert!(AccountAddress::ZERO.is_zero());
        let mut bytes = [0u8; 20];
        bytes[19] = 1;
        assert!(!AccountAddress::new(bytes).is_zero());
    }
}
