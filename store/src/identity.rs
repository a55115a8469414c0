//! Identity record storage trait.

use crate::StoreError;
use zkid_types::{AccountAddress, IdentityRecord};

pub trait IdentityStore {
    /// The record for `account`, if it ever registered.
    fn get_identity(&self, account: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError>;

    /// Number of registered identities.
    fn identity_count(&self) -> Result<u64, StoreError>;
}
