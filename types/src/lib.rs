//! Fundamental types for the ZKID identity ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, 256-bit digests and field elements, proofs, attribute and
//! verification-level enums, keys, timestamps and ledger parameters.

#[macro_use]
mod encoding;

pub mod address;
pub mod attribute;
pub mod error;
pub mod field;
pub mod hash;
pub mod identity;
pub mod keys;
pub mod level;
pub mod network;
pub mod params;
pub mod proof;
pub mod time;

pub use address::AccountAddress;
pub use attribute::AttributeType;
pub use error::TypeError;
pub use field::FieldElement;
pub use hash::Hash256;
pub use identity::IdentityRecord;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use level::VerificationLevel;
pub use network::NetworkId;
pub use params::LedgerParams;
pub use proof::Proof;
pub use time::{Clock, SystemClock, Timestamp};
