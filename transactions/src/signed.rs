//! The signed envelope every write travels in.

use crate::{Call, TransactionError};
use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, Hash256, KeyPair, NetworkId, PublicKey, Signature, Timestamp};

const SIGNING_DOMAIN: &[u8] = b"zkid-call-v1";

/// A [`Call`] signed by the account that issues it.
///
/// `nonce` must equal the signer's next nonce on the ledger; a successful
/// call bumps it, so a captured envelope cannot be replayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCall {
    pub call: Call,
    pub public_key: PublicKey,
    pub nonce: u64,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

#[derive(Serialize)]
struct SigningPayload<'a> {
    domain: &'a [u8],
    network: u8,
    call: &'a Call,
    public_key: &'a PublicKey,
    nonce: u64,
    timestamp: Timestamp,
}

fn signing_bytes(
    network: NetworkId,
    call: &Call,
    public_key: &PublicKey,
    nonce: u64,
    timestamp: Timestamp,
) -> Result<Vec<u8>, TransactionError> {
    Ok(bincode::serialize(&SigningPayload {
        domain: SIGNING_DOMAIN,
        network: network.tag(),
        call,
        public_key,
        nonce,
        timestamp,
    })?)
}

impl SignedCall {
    /// Sign `call` with `keypair` for `network`.
    pub fn sign(
        call: Call,
        keypair: &KeyPair,
        nonce: u64,
        timestamp: Timestamp,
        network: NetworkId,
    ) -> Result<Self, TransactionError> {
        let bytes = signing_bytes(network, &call, &keypair.public, nonce, timestamp)?;
        let signature = zkid_crypto::sign_message(&bytes, &keypair.private);
        Ok(Self {
            call,
            public_key: keypair.public.clone(),
            nonce,
            timestamp,
            signature,
        })
    }

    /// The bytes covered by the signature.
    pub fn signing_bytes(&self, network: NetworkId) -> Result<Vec<u8>, TransactionError> {
        signing_bytes(
            network,
            &self.call,
            &self.public_key,
            self.nonce,
            self.timestamp,
        )
    }

    /// Transaction hash: Blake2b over the signing bytes and the signature.
    pub fn hash(&self, network: NetworkId) -> Result<Hash256, TransactionError> {
        let bytes = self.signing_bytes(network)?;
        Ok(zkid_crypto::hash256_multi(&[
            &bytes,
            self.signature.as_bytes(),
        ]))
    }

    /// The account that issued the call.
    pub fn sender(&self) -> AccountAddress {
        zkid_crypto::derive_address(&self.public_key)
    }

    /// Check the signature for `network`.
    pub fn verify_signature(&self, network: NetworkId) -> Result<(), TransactionError> {
        let bytes = self.signing_bytes(network)?;
        if zkid_crypto::verify_signature(&bytes, &self.signature, &self.public_key) {
            Ok(())
        } else {
            Err(TransactionError::InvalidSignature {
                tx_hash: self.hash(network)?.to_string(),
            })
        }
    }
}
