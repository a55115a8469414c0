//! The identity verification ledger.
//!
//! Every write runs under one global write lock: plan the call against the
//! current state, commit the resulting batch atomically, release the lock,
//! then emit the events. Reads take the shared side of the same lock and so
//! never observe a half-applied call.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zkid_store::{LedgerStore, StoreError, StoreOp, WriteBatch};
use zkid_transactions::{
    validate_signed_call, Call, LedgerEvent, Query, QueryResponse, Receipt, SignedCall,
};
use zkid_types::{
    AccountAddress, AttributeType, Clock, FieldElement, Hash256, IdentityRecord, LedgerParams,
    NetworkId, Proof, SystemClock, Timestamp, VerificationLevel,
};
use zkid_verification::{
    hash_proof, validate_proof_shape, KeyRef, LevelPolicy, ManualLevelPolicy, ProofVerifier,
    ShapeOnlyVerifier,
};

use crate::certificate::{certificate_hash, Certificate};
use crate::events::EventBus;
use crate::LedgerError;

/// Ops to commit and events to emit for one call.
#[derive(Default)]
struct Plan {
    batch: WriteBatch,
    events: Vec<LedgerEvent>,
}

impl Plan {
    fn op(&mut self, op: StoreOp) -> &mut Self {
        self.batch.push(op);
        self
    }

    fn event(&mut self, event: LedgerEvent) -> &mut Self {
        self.events.push(event);
        self
    }
}

/// Owner, key registry and counters, for operators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub network: NetworkId,
    pub owner: Option<AccountAddress>,
    /// Registered key per attribute, zero when unset, in code order.
    pub verification_keys: Vec<(AttributeType, Hash256)>,
    pub identities: u64,
    pub nullifiers: u64,
}

pub struct IdentityLedger<S> {
    store: S,
    verifier: Box<dyn ProofVerifier>,
    policy: Box<dyn LevelPolicy>,
    clock: Box<dyn Clock>,
    params: LedgerParams,
    events: EventBus,
    gate: RwLock<()>,
}

impl<S: LedgerStore> IdentityLedger<S> {
    /// A ledger over `store` with the shape-only verifier, manual level
    /// policy and the system clock.
    pub fn new(store: S, params: LedgerParams) -> Self {
        Self {
            store,
            verifier: Box::new(ShapeOnlyVerifier),
            policy: Box::new(ManualLevelPolicy),
            clock: Box::new(SystemClock),
            params,
            events: EventBus::new(),
            gate: RwLock::new(()),
        }
    }

    pub fn with_verifier(mut self, verifier: impl ProofVerifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    pub fn with_policy(mut self, policy: impl LevelPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Register a listener for committed events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn verifier_name(&self) -> &str {
        self.verifier.name()
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Current ledger time.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn read_gate(&self) -> Result<RwLockReadGuard<'_, ()>, LedgerError> {
        self.gate.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write_gate(&self) -> Result<RwLockWriteGuard<'_, ()>, LedgerError> {
        self.gate.write().map_err(|_| LedgerError::LockPoisoned)
    }

    // ── Write paths ─────────────────────────────────────────────────────

    pub fn register_identity(
        &self,
        caller: &AccountAddress,
        commitment: Hash256,
        proof: Proof,
        nullifier: Hash256,
    ) -> Result<Receipt, LedgerError> {
        self.execute(
            caller,
            &Call::RegisterIdentity {
                commitment,
                proof,
                nullifier,
            },
        )
    }

    pub fn verify_attribute(
        &self,
        caller: &AccountAddress,
        attribute: AttributeType,
        proof: Proof,
        public_inputs: Vec<FieldElement>,
    ) -> Result<Receipt, LedgerError> {
        self.execute(
            caller,
            &Call::VerifyAttribute {
                attribute,
                proof,
                public_inputs,
            },
        )
    }

    pub fn set_verification_key(
        &self,
        caller: &AccountAddress,
        attribute: AttributeType,
        vk_hash: Hash256,
    ) -> Result<Receipt, LedgerError> {
        self.execute(caller, &Call::SetVerificationKey { attribute, vk_hash })
    }

    pub fn authorize_verifier(
        &self,
        caller: &AccountAddress,
        verifier: AccountAddress,
        authorized: bool,
    ) -> Result<Receipt, LedgerError> {
        self.execute(
            caller,
            &Call::AuthorizeVerifier {
                verifier,
                authorized,
            },
        )
    }

    pub fn update_verification_level(
        &self,
        caller: &AccountAddress,
        user: AccountAddress,
        level: VerificationLevel,
    ) -> Result<Receipt, LedgerError> {
        self.execute(caller, &Call::UpdateVerificationLevel { user, level })
    }

    pub fn transfer_ownership(
        &self,
        caller: &AccountAddress,
        new_owner: AccountAddress,
    ) -> Result<Receipt, LedgerError> {
        self.execute(caller, &Call::TransferOwnership { new_owner })
    }

    pub fn renounce_ownership(&self, caller: &AccountAddress) -> Result<Receipt, LedgerError> {
        self.execute(caller, &Call::RenounceOwnership)
    }

    /// Run `call` on behalf of an already authenticated `caller`.
    pub fn execute(&self, caller: &AccountAddress, call: &Call) -> Result<Receipt, LedgerError> {
        let result = self.run(caller, call, None);
        log_outcome(caller, call, &result);
        result
    }

    /// Authenticate and run a signed call.
    ///
    /// Checks, in order: timestamp tolerance and signature, then that the
    /// nonce equals the sender's next nonce. The nonce bump commits in the
    /// same batch as the call's own effects.
    pub fn submit(&self, signed: &SignedCall) -> Result<Receipt, LedgerError> {
        let caller = signed.sender();
        let result = self.run(&caller, &signed.call, Some(signed));
        log_outcome(&caller, &signed.call, &result);
        result
    }

    fn run(
        &self,
        caller: &AccountAddress,
        call: &Call,
        envelope: Option<&SignedCall>,
    ) -> Result<Receipt, LedgerError> {
        let receipt = {
            let _guard = self.write_gate()?;
            let now = self.clock.now();

            let mut tx_hash = None;
            let mut nonce_op = None;
            if let Some(signed) = envelope {
                validate_signed_call(
                    signed,
                    self.params.network,
                    now,
                    self.params.call_time_tolerance_secs,
                )?;
                let expected = self.store.get_nonce(caller)?;
                let invalid = LedgerError::InvalidNonce {
                    expected,
                    got: signed.nonce,
                };
                if signed.nonce != expected {
                    return Err(invalid);
                }
                let next = expected.checked_add(1).ok_or(invalid)?;
                nonce_op = Some(StoreOp::SetNonce {
                    account: *caller,
                    nonce: next,
                });
                tx_hash = Some(signed.hash(self.params.network)?);
            }

            let mut plan = self.plan(caller, call, now)?;
            if let Some(op) = nonce_op {
                plan.op(op);
            }
            self.commit(plan.batch)?;

            Receipt {
                tx_hash,
                caller: *caller,
                timestamp: now,
                events: plan.events,
            }
        };

        for event in &receipt.events {
            self.events.emit(event);
        }
        Ok(receipt)
    }

    /// Install the first owner. A no-op returning `None` once the ledger has
    /// been initialized, even if ownership was later renounced.
    pub fn initialize(&self, owner: &AccountAddress) -> Result<Option<Receipt>, LedgerError> {
        if owner.is_zero() {
            return Err(LedgerError::InvalidOwner);
        }
        let receipt = {
            let _guard = self.write_gate()?;
            if self.store.is_initialized()? {
                return Ok(None);
            }
            let mut plan = Plan::default();
            plan.op(StoreOp::SetOwner(Some(*owner)))
                .op(StoreOp::MarkInitialized)
                .event(LedgerEvent::OwnershipTransferred {
                    previous: None,
                    new: Some(*owner),
                });
            self.commit(plan.batch)?;
            Receipt {
                tx_hash: None,
                caller: *owner,
                timestamp: self.clock.now(),
                events: plan.events,
            }
        };
        for event in &receipt.events {
            self.events.emit(event);
        }
        info!(owner = %owner, "ledger initialized");
        Ok(Some(receipt))
    }

    /// Register the default key hash `H("verification_key_<code>")` for
    /// every attribute in one batch. Owner only.
    pub fn provision_verification_keys(
        &self,
        caller: &AccountAddress,
    ) -> Result<Receipt, LedgerError> {
        let _guard = self.write_gate()?;
        self.require_owner(caller)?;
        let now = self.clock.now();
        let batch: WriteBatch = AttributeType::ALL
            .iter()
            .map(|attr| StoreOp::PutVerificationKey {
                attribute: *attr,
                vk_hash: zkid_crypto::verification_key_hash(*attr),
            })
            .collect();
        self.commit(batch)?;
        info!(caller = %caller, keys = AttributeType::ALL.len(), "verification keys provisioned");
        Ok(Receipt {
            tx_hash: None,
            caller: *caller,
            timestamp: now,
            events: Vec::new(),
        })
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), LedgerError> {
        if batch.is_empty() {
            return Ok(());
        }
        self.store.commit(batch).map_err(|e| match e {
            StoreError::Duplicate(_) => LedgerError::NullifierReused,
            other => LedgerError::Store(other),
        })
    }

    // ── Planning (write lock held) ──────────────────────────────────────

    fn plan(
        &self,
        caller: &AccountAddress,
        call: &Call,
        now: Timestamp,
    ) -> Result<Plan, LedgerError> {
        match call {
            Call::RegisterIdentity {
                commitment,
                proof,
                nullifier,
            } => self.plan_register(caller, *commitment, proof, *nullifier, now),
            Call::VerifyAttribute {
                attribute,
                proof,
                public_inputs,
            } => self.plan_verify_attribute(caller, *attribute, proof, public_inputs),
            Call::SetVerificationKey { attribute, vk_hash } => {
                self.require_owner(caller)?;
                let mut plan = Plan::default();
                plan.op(StoreOp::PutVerificationKey {
                    attribute: *attribute,
                    vk_hash: *vk_hash,
                });
                Ok(plan)
            }
            Call::AuthorizeVerifier {
                verifier,
                authorized,
            } => {
                self.require_owner(caller)?;
                let mut plan = Plan::default();
                plan.op(StoreOp::SetVerifierAuthorization {
                    verifier: *verifier,
                    authorized: *authorized,
                })
                .event(LedgerEvent::VerifierAuthorized {
                    verifier: *verifier,
                    authorized: *authorized,
                });
                Ok(plan)
            }
            Call::UpdateVerificationLevel { user, level } => {
                self.plan_level_update(caller, user, *level)
            }
            Call::TransferOwnership { new_owner } => {
                self.require_owner(caller)?;
                if new_owner.is_zero() {
                    return Err(LedgerError::InvalidOwner);
                }
                let mut plan = Plan::default();
                plan.op(StoreOp::SetOwner(Some(*new_owner)))
                    .event(LedgerEvent::OwnershipTransferred {
                        previous: Some(*caller),
                        new: Some(*new_owner),
                    });
                Ok(plan)
            }
            Call::RenounceOwnership => {
                self.require_owner(caller)?;
                let mut plan = Plan::default();
                plan.op(StoreOp::SetOwner(None))
                    .event(LedgerEvent::OwnershipTransferred {
                        previous: Some(*caller),
                        new: None,
                    });
                Ok(plan)
            }
        }
    }

    fn plan_register(
        &self,
        caller: &AccountAddress,
        commitment: Hash256,
        proof: &Proof,
        nullifier: Hash256,
        now: Timestamp,
    ) -> Result<Plan, LedgerError> {
        if self.active_identity(caller)?.is_some() {
            return Err(LedgerError::AlreadyRegistered);
        }
        if self.store.is_nullifier_used(&nullifier)? {
            return Err(LedgerError::NullifierReused);
        }
        validate_proof_shape(proof)?;
        if !self
            .verifier
            .verify(proof, &proof.public_inputs, &KeyRef::Registration)
        {
            return Err(LedgerError::ProofRejected);
        }

        let level = self.params.registration_level;
        let mut plan = Plan::default();
        plan.op(StoreOp::InsertNullifier(nullifier))
            .op(StoreOp::PutIdentity {
                account: *caller,
                record: IdentityRecord::registered(commitment, level, now),
            })
            .event(LedgerEvent::IdentityRegistered {
                account: *caller,
                commitment,
                level,
            });
        Ok(plan)
    }

    fn plan_verify_attribute(
        &self,
        caller: &AccountAddress,
        attribute: AttributeType,
        proof: &Proof,
        public_inputs: &[FieldElement],
    ) -> Result<Plan, LedgerError> {
        let record = self
            .active_identity(caller)?
            .ok_or(LedgerError::IdentityRequired)?;
        validate_proof_shape(proof)?;
        let vk_hash = self
            .store
            .get_verification_key(attribute)?
            .filter(|h| !h.is_zero())
            .ok_or(LedgerError::NoVerificationKey(attribute))?;
        if !self
            .verifier
            .verify(proof, public_inputs, &KeyRef::Attribute(attribute, vk_hash))
        {
            return Err(LedgerError::ProofRejected);
        }

        let mut plan = Plan::default();
        plan.op(StoreOp::SetAttributeVerified {
            account: *caller,
            attribute,
        })
        .event(LedgerEvent::AttributeVerified {
            account: *caller,
            attribute,
            proof_hash: hash_proof(proof, public_inputs),
        });

        let mut verified = self.store.verified_attributes(caller)?;
        if !verified.contains(&attribute) {
            verified.push(attribute);
            verified.sort();
        }
        let next = self.policy.level_after(record.level, &verified);
        if next > record.level {
            plan.op(StoreOp::PutIdentity {
                account: *caller,
                record: IdentityRecord {
                    level: next,
                    ..record
                },
            })
            .event(LedgerEvent::VerificationLevelUpdated {
                account: *caller,
                new_level: next,
            });
        }
        Ok(plan)
    }

    fn plan_level_update(
        &self,
        caller: &AccountAddress,
        user: &AccountAddress,
        level: VerificationLevel,
    ) -> Result<Plan, LedgerError> {
        let is_owner = self.store.get_owner()? == Some(*caller);
        if !is_owner && !self.store.is_authorized_verifier(caller)? {
            return Err(LedgerError::Unauthorized);
        }
        let record = self
            .active_identity(user)?
            .ok_or(LedgerError::IdentityRequired)?;
        if level < record.level {
            return Err(LedgerError::LevelDowngrade {
                current: record.level,
                requested: level,
            });
        }

        let mut plan = Plan::default();
        if level > record.level {
            plan.op(StoreOp::PutIdentity {
                account: *user,
                record: IdentityRecord { level, ..record },
            })
            .event(LedgerEvent::VerificationLevelUpdated {
                account: *user,
                new_level: level,
            });
        }
        Ok(plan)
    }

    fn require_owner(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        if self.store.get_owner()? == Some(*caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized)
        }
    }

    // ── Read paths ──────────────────────────────────────────────────────

    fn active_identity(
        &self,
        user: &AccountAddress,
    ) -> Result<Option<IdentityRecord>, LedgerError> {
        Ok(self.store.get_identity(user)?.filter(|r| r.is_active))
    }

    fn load_identity(&self, user: &AccountAddress) -> Result<IdentityRecord, LedgerError> {
        Ok(self.store.get_identity(user)?.unwrap_or_default())
    }

    fn load_verification_key(&self, attribute: AttributeType) -> Result<Hash256, LedgerError> {
        Ok(self
            .store
            .get_verification_key(attribute)?
            .unwrap_or(Hash256::ZERO))
    }

    fn certificate_keys(
        &self,
        attributes: &[AttributeType],
    ) -> Result<Vec<(AttributeType, Hash256)>, LedgerError> {
        attributes
            .iter()
            .map(|attr| Ok((*attr, self.load_verification_key(*attr)?)))
            .collect()
    }

    /// The identity record of `user`; the zero record when absent.
    pub fn identity(&self, user: &AccountAddress) -> Result<IdentityRecord, LedgerError> {
        let _guard = self.read_gate()?;
        self.load_identity(user)
    }

    pub fn get_verification_level(
        &self,
        user: &AccountAddress,
    ) -> Result<VerificationLevel, LedgerError> {
        Ok(self.identity(user)?.level)
    }

    pub fn has_verified_attribute(
        &self,
        user: &AccountAddress,
        attribute: AttributeType,
    ) -> Result<bool, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(self.store.is_attribute_verified(user, attribute)?)
    }

    /// Registered key hash for `attribute`, zero when unset.
    pub fn verification_key(&self, attribute: AttributeType) -> Result<Hash256, LedgerError> {
        let _guard = self.read_gate()?;
        self.load_verification_key(attribute)
    }

    pub fn is_nullifier_used(&self, nullifier: &Hash256) -> Result<bool, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(self.store.is_nullifier_used(nullifier)?)
    }

    pub fn is_authorized_verifier(&self, account: &AccountAddress) -> Result<bool, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(self.store.is_authorized_verifier(account)?)
    }

    pub fn owner(&self) -> Result<Option<AccountAddress>, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(self.store.get_owner()?)
    }

    /// Next nonce `account` must sign with.
    pub fn nonce(&self, account: &AccountAddress) -> Result<u64, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(self.store.get_nonce(account)?)
    }

    /// Certificate hash for `caller` over `attributes`.
    ///
    /// Fails with `IdentityRequired` without an active identity, even for an
    /// empty list, and with `AttributeNotVerified` at the first listed
    /// attribute that is not verified.
    pub fn generate_certificate(
        &self,
        caller: &AccountAddress,
        attributes: &[AttributeType],
    ) -> Result<Hash256, LedgerError> {
        let _guard = self.read_gate()?;
        self.certificate_for(caller, attributes)
    }

    /// [`generate_certificate`](Self::generate_certificate), stamped with
    /// the current ledger time.
    pub fn issue_certificate(
        &self,
        caller: &AccountAddress,
        attributes: &[AttributeType],
    ) -> Result<Certificate, LedgerError> {
        Ok(Certificate {
            certificate_hash: self.generate_certificate(caller, attributes)?,
            timestamp: self.clock.now(),
            attribute_types: attributes.to_vec(),
        })
    }

    fn certificate_for(
        &self,
        caller: &AccountAddress,
        attributes: &[AttributeType],
    ) -> Result<Hash256, LedgerError> {
        self.active_identity(caller)?
            .ok_or(LedgerError::IdentityRequired)?;
        for attr in attributes {
            if !self.store.is_attribute_verified(caller, *attr)? {
                return Err(LedgerError::AttributeNotVerified(*attr));
            }
        }
        let keys = self.certificate_keys(attributes)?;
        Ok(certificate_hash(self.params.network, caller, &keys))
    }

    /// Whether a presented certificate still holds. Never fails: storage
    /// errors are logged and read as `false`.
    pub fn verify_certificate(
        &self,
        user: &AccountAddress,
        attributes: &[AttributeType],
        certificate_hash: &Hash256,
        timestamp: Timestamp,
    ) -> bool {
        match self.read_gate() {
            Ok(_guard) => self.certificate_holds(user, attributes, certificate_hash, timestamp),
            Err(e) => {
                warn!(user = %user, error = %e, "certificate check failed");
                false
            }
        }
    }

    fn certificate_holds(
        &self,
        user: &AccountAddress,
        attributes: &[AttributeType],
        presented: &Hash256,
        timestamp: Timestamp,
    ) -> bool {
        self.check_certificate(user, attributes, presented, timestamp)
            .unwrap_or_else(|e| {
                warn!(user = %user, error = %e, "certificate check failed");
                false
            })
    }

    fn check_certificate(
        &self,
        user: &AccountAddress,
        attributes: &[AttributeType],
        presented: &Hash256,
        timestamp: Timestamp,
    ) -> Result<bool, LedgerError> {
        let now = self.clock.now();
        if timestamp.is_future(now, self.params.clock_skew_secs) {
            debug!(user = %user, %timestamp, %now, "certificate from the future");
            return Ok(false);
        }
        if let Some(max_age) = self.params.certificate_max_age_secs {
            if timestamp.elapsed_since(now) > max_age {
                debug!(user = %user, %timestamp, max_age, "certificate expired");
                return Ok(false);
            }
        }
        if self.active_identity(user)?.is_none() {
            return Ok(false);
        }
        for attr in attributes {
            if !self.store.is_attribute_verified(user, *attr)? {
                return Ok(false);
            }
        }
        let keys = self.certificate_keys(attributes)?;
        Ok(certificate_hash(self.params.network, user, &keys) == *presented)
    }

    /// Owner, registry and counters.
    pub fn deployment_info(&self) -> Result<DeploymentInfo, LedgerError> {
        let _guard = self.read_gate()?;
        Ok(DeploymentInfo {
            network: self.params.network,
            owner: self.store.get_owner()?,
            verification_keys: self.certificate_keys(&AttributeType::ALL)?,
            identities: self.store.identity_count()?,
            nullifiers: self.store.nullifier_count()?,
        })
    }

    /// Answer a read-only query.
    pub fn query(&self, query: &Query) -> Result<QueryResponse, LedgerError> {
        let _guard = self.read_gate()?;
        let response = match query {
            Query::Identity { user } => QueryResponse::Identity(self.load_identity(user)?),
            Query::VerificationLevel { user } => {
                QueryResponse::Level(self.load_identity(user)?.level)
            }
            Query::HasVerifiedAttribute { user, attribute } => {
                QueryResponse::Bool(self.store.is_attribute_verified(user, *attribute)?)
            }
            Query::GenerateCertificate { caller, attributes } => {
                QueryResponse::Hash(self.certificate_for(caller, attributes)?)
            }
            Query::VerificationKey { attribute } => {
                QueryResponse::Hash(self.load_verification_key(*attribute)?)
            }
            Query::NullifierUsed { nullifier } => {
                QueryResponse::Bool(self.store.is_nullifier_used(nullifier)?)
            }
            Query::AuthorizedVerifier { account } => {
                QueryResponse::Bool(self.store.is_authorized_verifier(account)?)
            }
            Query::Owner => QueryResponse::Owner(self.store.get_owner()?),
            Query::Nonce { account } => QueryResponse::Nonce(self.store.get_nonce(account)?),
            Query::VerifyCertificate {
                user,
                attributes,
                certificate_hash,
                timestamp,
            } => QueryResponse::Bool(self.certificate_holds(
                user,
                attributes,
                certificate_hash,
                *timestamp,
            )),
        };
        Ok(response)
    }
}

fn log_outcome(caller: &AccountAddress, call: &Call, result: &Result<Receipt, LedgerError>) {
    match result {
        Ok(receipt) => info!(
            caller = %caller,
            call = call.name(),
            events = receipt.events.len(),
            "call committed"
        ),
        Err(e) => debug!(
            caller = %caller,
            call = call.name(),
            code = e.code(),
            error = %e,
            "call rejected"
        ),
    }
}
