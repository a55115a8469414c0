//! Atomic batch commit.
//!
//! The whole batch runs in one LMDB write transaction. Any failure returns
//! before `commit`, dropping the transaction and rolling everything back.

use heed::RwTxn;

use zkid_store::{LedgerStore, StoreError, StoreOp, WriteBatch};

use crate::environment::{LmdbStore, INITIALIZED_KEY, OWNER_KEY};
use crate::tables::attribute_key;
use crate::LmdbError;

const PRESENT: &[u8] = &[1];

impl LmdbStore {
    fn apply(&self, wtxn: &mut RwTxn<'_>, op: StoreOp) -> Result<(), StoreError> {
        match op {
            StoreOp::PutIdentity { account, record } => {
                let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
                self.identities_db
                    .put(wtxn, account.as_bytes(), &bytes)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::InsertNullifier(nullifier) => {
                let exists = self
                    .nullifiers_db
                    .get(wtxn, nullifier.as_bytes())
                    .map_err(LmdbError::from)?
                    .is_some();
                if exists {
                    return Err(StoreError::Duplicate(format!("nullifier {nullifier}")));
                }
                self.nullifiers_db
                    .put(wtxn, nullifier.as_bytes(), PRESENT)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetAttributeVerified { account, attribute } => {
                self.attributes_db
                    .put(wtxn, &attribute_key(&account, attribute), PRESENT)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::PutVerificationKey { attribute, vk_hash } => {
                self.verification_keys_db
                    .put(wtxn, &[attribute.code()], vk_hash.as_bytes())
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetOwner(Some(owner)) => {
                self.meta_db
                    .put(wtxn, OWNER_KEY, owner.as_bytes())
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetOwner(None) => {
                self.meta_db
                    .delete(wtxn, OWNER_KEY)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::MarkInitialized => {
                self.meta_db
                    .put(wtxn, INITIALIZED_KEY, PRESENT)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetVerifierAuthorization {
                verifier,
                authorized: true,
            } => {
                self.verifiers_db
                    .put(wtxn, verifier.as_bytes(), PRESENT)
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetVerifierAuthorization {
                verifier,
                authorized: false,
            } => {
                self.verifiers_db
                    .delete(wtxn, verifier.as_bytes())
                    .map_err(LmdbError::from)?;
            }
            StoreOp::SetNonce { account, nonce } => {
                self.nonces_db
                    .put(wtxn, account.as_bytes(), &nonce.to_be_bytes())
                    .map_err(LmdbError::from)?;
            }
        }
        Ok(())
    }
}

impl LedgerStore for LmdbStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let ops = batch.len();
        for op in batch {
            self.apply(&mut wtxn, op)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops, "committed write batch");
        Ok(())
    }
}
