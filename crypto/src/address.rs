//! Account address derivation from public keys.
//!
//! An account address is the last 20 bytes of Blake2b-256(public_key). The
//! ledger never stores public keys; it derives the caller's address from the
//! key that signed the call.

use zkid_types::{AccountAddress, PublicKey};

/// Derive the account address controlled by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    let digest = crate::blake2b_256(public_key.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    AccountAddress::new(bytes)
}
