//! Metadata storage trait.

use crate::StoreError;

/// Bookkeeping that doesn't belong in any ledger table.
pub trait MetaStore {
    /// Schema version the database was created with. `None` for a new database.
    fn get_schema_version(&self) -> Result<Option<u32>, StoreError>;

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError>;
}
