//! Per-account call nonce storage trait.

use crate::StoreError;
use zkid_types::AccountAddress;

pub trait NonceStore {
    /// Next nonce `account` must sign with. Zero for unseen accounts.
    fn get_nonce(&self, account: &AccountAddress) -> Result<u64, StoreError>;
}
