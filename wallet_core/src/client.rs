//! Identity operations a wallet offers its user.

use std::collections::BTreeSet;

use tracing::{debug, info};
use zkid_ledger::Certificate;
use zkid_transactions::{Call, Query, QueryResponse};
use zkid_types::{
    AccountAddress, AttributeType, FieldElement, Hash256, IdentityRecord, Proof, Timestamp,
    VerificationLevel,
};

use crate::error::ClientError;
use crate::provider::Provider;

/// What the ledger says about the connected account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityStatus {
    /// `None` when nothing was ever registered.
    pub identity: Option<IdentityRecord>,
    pub level: VerificationLevel,
    pub verified_attributes: BTreeSet<AttributeType>,
}

impl IdentityStatus {
    pub fn is_registered(&self) -> bool {
        self.identity.is_some_and(|r| r.is_active)
    }

    pub fn has_basic_verification(&self) -> bool {
        self.level >= VerificationLevel::Basic
    }

    pub fn has_enhanced_verification(&self) -> bool {
        self.level >= VerificationLevel::Enhanced
    }

    pub fn has_premium_verification(&self) -> bool {
        self.level >= VerificationLevel::Premium
    }
}

pub struct IdentityClient<P> {
    provider: P,
}

impl<P: Provider> IdentityClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn account(&self) -> Result<AccountAddress, ClientError> {
        self.provider
            .current_account()
            .ok_or(ClientError::NotConnected)
    }

    async fn read<T>(
        &self,
        query: Query,
        extract: impl FnOnce(&QueryResponse) -> Option<T>,
    ) -> Result<T, ClientError> {
        let name = query.name();
        let response = self.provider.read_state(query).await?;
        extract(&response)
            .ok_or_else(|| ClientError::UnexpectedResponse(format!("{name}: {response:?}")))
    }

    /// Load the connected account's record and every verified attribute.
    ///
    /// A record whose commitment is zero counts as no identity.
    pub async fn check_identity(&self) -> Result<IdentityStatus, ClientError> {
        let user = self.account()?;
        let record = self
            .read(Query::Identity { user }, |r| r.as_identity().copied())
            .await?;
        if record.identity_commitment.is_zero() {
            return Ok(IdentityStatus::default());
        }

        let mut verified_attributes = BTreeSet::new();
        for attribute in AttributeType::ALL {
            let verified = self
                .read(Query::HasVerifiedAttribute { user, attribute }, |r| {
                    r.as_bool()
                })
                .await?;
            if verified {
                verified_attributes.insert(attribute);
            }
        }
        debug!(
            %user,
            level = %record.level,
            attributes = verified_attributes.len(),
            "identity loaded"
        );
        Ok(IdentityStatus {
            identity: Some(record),
            level: record.level,
            verified_attributes,
        })
    }

    async fn write(&self, call: Call) -> Result<Hash256, ClientError> {
        let name = call.name();
        let tx_hash = self.provider.submit_transaction(call).await?;
        self.provider.await_confirmation(tx_hash).await?;
        info!(%tx_hash, call = name, "call confirmed");
        Ok(tx_hash)
    }

    /// Register the connected account. Returns the confirmed call hash.
    pub async fn register_identity(
        &self,
        commitment: Hash256,
        proof: Proof,
        nullifier: Hash256,
    ) -> Result<Hash256, ClientError> {
        self.write(Call::RegisterIdentity {
            commitment,
            proof,
            nullifier,
        })
        .await
    }

    pub async fn verify_attribute(
        &self,
        attribute: AttributeType,
        proof: Proof,
        public_inputs: Vec<FieldElement>,
    ) -> Result<Hash256, ClientError> {
        self.write(Call::VerifyAttribute {
            attribute,
            proof,
            public_inputs,
        })
        .await
    }

    /// Ask the ledger for a certificate over `attributes` and stamp it with
    /// the current wall-clock time.
    pub async fn generate_certificate(
        &self,
        attributes: Vec<AttributeType>,
    ) -> Result<Certificate, ClientError> {
        let caller = self.account()?;
        let certificate_hash = self
            .read(
                Query::GenerateCertificate {
                    caller,
                    attributes: attributes.clone(),
                },
                |r| r.as_hash(),
            )
            .await?;
        Ok(Certificate {
            certificate_hash,
            timestamp: Timestamp::now(),
            attribute_types: attributes,
        })
    }

    /// Check a certificate presented by `user`. Needs no signer.
    pub async fn verify_certificate(
        &self,
        user: AccountAddress,
        certificate: &Certificate,
    ) -> Result<bool, ClientError> {
        self.read(
            Query::VerifyCertificate {
                user,
                attributes: certificate.attribute_types.clone(),
                certificate_hash: certificate.certificate_hash,
                timestamp: certificate.timestamp,
            },
            |r| r.as_bool(),
        )
        .await
    }
}
