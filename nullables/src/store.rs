//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use zkid_store::{
    AttributeStore, IdentityStore, LedgerStore, MetaStore, NonceStore, NullifierStore,
    RegistryStore, StoreError, StoreOp, WriteBatch,
};
use zkid_types::{AccountAddress, AttributeType, Hash256, IdentityRecord};

#[derive(Default)]
struct State {
    identities: HashMap<AccountAddress, IdentityRecord>,
    nullifiers: HashSet<Hash256>,
    attributes: HashMap<AccountAddress, BTreeSet<AttributeType>>,
    verification_keys: HashMap<AttributeType, Hash256>,
    owner: Option<AccountAddress>,
    initialized: bool,
    verifiers: HashSet<AccountAddress>,
    nonces: HashMap<AccountAddress, u64>,
    schema_version: Option<u32>,
    commits: u64,
}

impl State {
    fn apply(&mut self, op: StoreOp) {
        match op {
            StoreOp::PutIdentity { account, record } => {
                self.identities.insert(account, record);
            }
            StoreOp::InsertNullifier(n) => {
                self.nullifiers.insert(n);
            }
            StoreOp::SetAttributeVerified { account, attribute } => {
                self.attributes.entry(account).or_default().insert(attribute);
            }
            StoreOp::PutVerificationKey { attribute, vk_hash } => {
                self.verification_keys.insert(attribute, vk_hash);
            }
            StoreOp::SetOwner(owner) => self.owner = owner,
            StoreOp::MarkInitialized => self.initialized = true,
            StoreOp::SetVerifierAuthorization {
                verifier,
                authorized,
            } => {
                if authorized {
                    self.verifiers.insert(verifier);
                } else {
                    self.verifiers.remove(&verifier);
                }
            }
            StoreOp::SetNonce { account, nonce } => {
                self.nonces.insert(account, nonce);
            }
        }
    }
}

/// An in-memory ledger store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Default)]
pub struct NullStore {
    state: Mutex<State>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("null store mutex poisoned".into()))
    }

    /// Forget that `account` verified `attribute`.
    ///
    /// The ledger never does this; tests use it to make a certificate's
    /// attribute unverifiable.
    pub fn clear_attribute(
        &self,
        account: &AccountAddress,
        attribute: AttributeType,
    ) -> Result<(), StoreError> {
        if let Some(set) = self.state()?.attributes.get_mut(account) {
            set.remove(&attribute);
        }
        Ok(())
    }

    /// Number of batches committed so far.
    pub fn commit_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.commits)
    }
}

impl IdentityStore for NullStore {
    fn get_identity(&self, account: &AccountAddress) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self.state()?.identities.get(account).copied())
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.identities.len() as u64)
    }
}

impl NullifierStore for NullStore {
    fn is_nullifier_used(&self, nullifier: &Hash256) -> Result<bool, StoreError> {
        Ok(self.state()?.nullifiers.contains(nullifier))
    }

    fn nullifier_count(&self) -> Result<u64, StoreError> {
        Ok(self.state()?.nullifiers.len() as u64)
    }
}

impl AttributeStore for NullStore {
    fn is_attribute_verified(
        &self,
        account: &AccountAddress,
        attribute: AttributeType,
    ) -> Result<bool, StoreError> {
        Ok(self
            .state()?
            .attributes
            .get(account)
            .is_some_and(|set| set.contains(&attribute)))
    }

    fn verified_attributes(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<AttributeType>, StoreError> {
        Ok(self
            .state()?
            .attributes
            .get(account)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }
}

impl RegistryStore for NullStore {
    fn get_verification_key(
        &self,
        attribute: AttributeType,
    ) -> Result<Option<Hash256>, StoreError> {
        Ok(self.state()?.verification_keys.get(&attribute).copied())
    }

    fn get_owner(&self) -> Result<Option<AccountAddress>, StoreError> {
        Ok(self.state()?.owner)
    }

    fn is_authorized_verifier(&self, account: &AccountAddress) -> Result<bool, StoreError> {
        Ok(self.state()?.verifiers.contains(account))
    }

    fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(self.state()?.initialized)
    }
}

impl NonceStore for NullStore {
    fn get_nonce(&self, account: &AccountAddress) -> Result<u64, StoreError> {
        Ok(self.state()?.nonces.get(account).copied().unwrap_or(0))
    }
}

impl MetaStore for NullStore {
    fn get_schema_version(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.state()?.schema_version)
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.state()?.schema_version = Some(version);
        Ok(())
    }
}

impl LedgerStore for NullStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut state = self.state()?;

        // Validate before touching anything so a failed batch leaves no trace.
        let mut fresh = HashSet::new();
        for op in batch.ops() {
            if let StoreOp::InsertNullifier(n) = op {
                if state.nullifiers.contains(n) || !fresh.insert(*n) {
                    return Err(StoreError::Duplicate(format!("nullifier {n}")));
                }
            }
        }

        for op in batch {
            state.apply(op);
        }
        state.commits += 1;
        Ok(())
    }
}
