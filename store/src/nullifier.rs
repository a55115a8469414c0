//! Nullifier set storage trait.
//!
//! The set is append-only and global across accounts.

use crate::StoreError;
use zkid_types::Hash256;

pub trait NullifierStore {
    fn is_nullifier_used(&self, nullifier: &Hash256) -> Result<bool, StoreError>;

    fn nullifier_count(&self) -> Result<u64, StoreError>;
}
