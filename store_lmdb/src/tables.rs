//! Read-side trait implementations.

use zkid_store::{
    AttributeStore, IdentityStore, MetaStore, NonceStore, NullifierStore, RegistryStore,
    StoreError,
};
use zkid_types::{AccountAddress, AttributeType, Hash256, IdentityRecord};

use crate::environment::{
    decode_fixed, decode_u32, LmdbStore, INITIALIZED_KEY, OWNER_KEY, SCHEMA_VERSION_KEY,
};
use crate::LmdbError;

/// Composite key `address ++ attribute code`.
pub(crate) fn attribute_key(account: &AccountAddress, attribute: AttributeType) -> [u8; 21] {
    let mut key = [0u8; 21];
    key[..20].copy_from_slice(account.as_bytes());
    key[20] = attribute.code();
    key
}

impl IdentityStore for LmdbStore {
    fn get_identity(&self, account: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError> {
        self.read(|rtxn| {
            match self.identities_db.get(rtxn, account.as_bytes())? {
                Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
                None => Ok(None),
            }
        })
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        self.read(|rtxn| Ok(self.identities_db.len(rtxn)?))
    }
}

impl NullifierStore for LmdbStore {
    fn is_nullifier_used(&self, nullifier: &Hash256) -> Result<bool, StoreError> {
        self.read(|rtxn| Ok(self.nullifiers_db.get(rtxn, nullifier.as_bytes())?.is_some()))
    }

    fn nullifier_count(&self) -> Result<u64, StoreError> {
        self.read(|rtxn| Ok(self.nullifiers_db.len(rtxn)?))
    }
}

impl AttributeStore for LmdbStore {
    fn is_attribute_verified(
        &self,
        account: &AccountAddress,
        attribute: AttributeType,
    ) -> Result<bool, StoreError> {
        let key = attribute_key(account, attribute);
        self.read(|rtxn| Ok(self.attributes_db.get(rtxn, &key)?.is_some()))
    }

    fn verified_attributes(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<AttributeType>, StoreError> {
        self.read(|rtxn| {
            let mut out = Vec::new();
            for entry in self.attributes_db.prefix_iter(rtxn, account.as_bytes())? {
                let (key, _) = entry?;
                let code = key.get(20).copied().ok_or_else(|| {
                    LmdbError::Serialization(format!("attribute key of {} bytes", key.len()))
                })?;
                let attribute = AttributeType::try_from(code)
                    .map_err(|e| LmdbError::Serialization(e.to_string()))?;
                out.push(attribute);
            }
            Ok(out)
        })
    }
}

impl RegistryStore for LmdbStore {
    fn get_verification_key(
        &self,
        attribute: AttributeType,
    ) -> Result<Option<Hash256>, StoreError> {
        self.read(|rtxn| {
            match self.verification_keys_db.get(rtxn, &[attribute.code()])? {
                Some(bytes) => Ok(Some(Hash256::new(decode_fixed(bytes)?))),
                None => Ok(None),
            }
        })
    }

    fn get_owner(&self) -> Result<Option<AccountAddress>, StoreError> {
        self.read(|rtxn| match self.meta_db.get(rtxn, OWNER_KEY)? {
            Some(bytes) => Ok(Some(AccountAddress::new(decode_fixed(bytes)?))),
            None => Ok(None),
        })
    }

    fn is_authorized_verifier(&self, account: &AccountAddress) -> Result<bool, StoreError> {
        self.read(|rtxn| Ok(self.verifiers_db.get(rtxn, account.as_bytes())?.is_some()))
    }

    fn is_initialized(&self) -> Result<bool, StoreError> {
        self.read(|rtxn| Ok(self.meta_db.get(rtxn, INITIALIZED_KEY)?.is_some()))
    }
}

impl NonceStore for LmdbStore {
    fn get_nonce(&self, account: &AccountAddress) -> Result<u64, StoreError> {
        self.read(|rtxn| match self.nonces_db.get(rtxn, account.as_bytes())? {
            Some(bytes) => Ok(u64::from_be_bytes(decode_fixed(bytes)?)),
            None => Ok(0),
        })
    }
}

impl MetaStore for LmdbStore {
    fn get_schema_version(&self) -> Result<Option<u32>, StoreError> {
        self.read(|rtxn| match self.meta_db.get(rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => Ok(Some(decode_u32(bytes)?)),
            None => Ok(None),
        })
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, SCHEMA_VERSION_KEY, &version.to_le_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
