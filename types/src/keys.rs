//! Ed25519 key types used to sign ledger calls.

use crate::encoding;
use crate::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte Ed25519 private key (secret seed).
///
/// Does not implement `Debug`, `Serialize`, or `Clone`. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// An Ed25519 key pair.
///
/// Build with `zkid_crypto::generate_keypair()` or `zkid_crypto::keypair_from_seed()`.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encoding::encode(&self.0))
    }
}

impl FromStr for PublicKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encoding::decode_fixed::<32>(s).map(Self)
    }
}

impl_hex_serde!(PublicKey, 32);

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", encoding::encode(&self.0))
    }
}

impl FromStr for Signature {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encoding::decode_fixed::<64>(s).map(Self)
    }
}

// serde has no array impls past 32 elements, so the binary form goes
// through `serialize_bytes`.
impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SigVisitor;

        impl<'de> serde::de::Visitor<'de> for SigVisitor {
            type Value = Signature;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "64 bytes or a 128-digit hex string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                let arr: [u8; 64] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Signature(arr))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; 64];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(arr))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(SigVisitor)
        } else {
            deserializer.deserialize_bytes(SigVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_json_round_trip() {
        let sig = Signature([7u8; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json.len(), 2 + 2 + 128);
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn signature_bincode_round_trip() {
        let sig = Signature([9u8; 64]);
        let bytes = bincode::serialize(&sig).unwrap();
        let back: Signature = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn public_key_parses_from_display() {
        let pk = PublicKey([3u8; 32]);
        assert_eq!(pk.to_string().parse::<PublicKey>().unwrap(), pk);
    }
}
