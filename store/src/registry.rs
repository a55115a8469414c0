//! Verification key registry and access control storage trait.

use crate::StoreError;
use zkid_types::{AccountAddress, AttributeType, Hash256};

pub trait RegistryStore {
    /// Key hash registered for `attribute`, if any.
    fn get_verification_key(&self, attribute: AttributeType)
        -> Result<Option<Hash256>, StoreError>;

    /// Current owner. `None` before first start and after renouncement.
    fn get_owner(&self) -> Result<Option<AccountAddress>, StoreError>;

    fn is_authorized_verifier(&self, account: &AccountAddress) -> Result<bool, StoreError>;

    /// Whether the initial owner has ever been installed. Stays true after
    /// ownership is renounced.
    fn is_initialized(&self) -> Result<bool, StoreError>;
}
