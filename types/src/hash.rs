//! 256-bit digest type used for commitments, nullifiers, key references,
//! proof hashes, certificate hashes and transaction hashes.

use crate::encoding;
use crate::TypeError;
use std::fmt;
use std::str::FromStr;

/// A 32-byte opaque digest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", encoding::encode(&self.0[..4]))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encoding::encode(&self.0))
    }
}

impl FromStr for Hash256 {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encoding::decode_fixed::<32>(s).map(Self)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(Hash256, 32);
