//! Attribute verification storage trait.

use crate::StoreError;
use zkid_types::{AccountAddress, AttributeType};

pub trait AttributeStore {
    fn is_attribute_verified(
        &self,
        account: &AccountAddress,
        attribute: AttributeType,
    ) -> Result<bool, StoreError>;

    /// Every verified attribute of `account`, in code order.
    fn verified_attributes(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<AttributeType>, StoreError>;
}
