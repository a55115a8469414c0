//! Cryptographic primitives for the ZKID identity ledger.
//!
//! - **Ed25519** for signing ledger calls
//! - **Blake2b** for every digest (call hashes, proof hashes, certificates)
//! - Account address derivation from public keys
//! - Commitment and nullifier derivation for clients that hold identity secrets

pub mod address;
pub mod commitment;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use commitment::{derive_identity_commitment, derive_nullifier, verification_key_hash};
pub use hash::{blake2b_256, blake2b_256_multi, hash256, hash256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
