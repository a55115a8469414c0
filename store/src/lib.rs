//! Abstract storage traits for the ZKID identity ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.
//!
//! Reads go through the per-table traits. Writes never do: the ledger plans
//! a [`WriteBatch`] and hands it to [`LedgerStore::commit`], which applies
//! all of it or none of it.

pub mod attribute;
pub mod batch;
pub mod error;
pub mod identity;
pub mod meta;
pub mod nonce;
pub mod nullifier;
pub mod registry;

pub use attribute::AttributeStore;
pub use batch::{StoreOp, WriteBatch};
pub use error::StoreError;
pub use identity::IdentityStore;
pub use meta::MetaStore;
pub use nonce::NonceStore;
pub use nullifier::NullifierStore;
pub use registry::RegistryStore;

/// The full storage surface the ledger needs.
pub trait LedgerStore:
    IdentityStore + NullifierStore + AttributeStore + RegistryStore + NonceStore + Send + Sync
{
    /// Apply every op in `batch` atomically.
    ///
    /// A [`StoreOp::InsertNullifier`] for a nullifier that is already present
    /// fails the whole batch with [`StoreError::Duplicate`]; nothing from the
    /// batch becomes visible.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
