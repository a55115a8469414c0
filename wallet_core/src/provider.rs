//! Connection to a ledger: who is signing, how reads and writes travel.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use zkid_crypto::derive_address;
use zkid_ledger::IdentityLedger;
use zkid_store::LedgerStore;
use zkid_transactions::{Call, CallOutcome, Query, QueryResponse, Receipt, SignedCall};
use zkid_types::{AccountAddress, Hash256, KeyPair};

use crate::error::ClientError;

/// A ledger connection as seen by a wallet.
pub trait Provider: Send + Sync {
    /// The signing account, if a wallet is connected.
    fn current_account(&self) -> Option<AccountAddress>;

    fn read_state(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<QueryResponse, ClientError>> + Send;

    /// Sign `call` as the current account and hand it to the ledger.
    /// Returns the call hash to await.
    fn submit_transaction(
        &self,
        call: Call,
    ) -> impl Future<Output = Result<Hash256, ClientError>> + Send;

    /// Wait for the outcome of a submitted call. A rejected call surfaces as
    /// [`ClientError::Rejected`].
    fn await_confirmation(
        &self,
        tx_hash: Hash256,
    ) -> impl Future<Output = Result<Receipt, ClientError>> + Send;
}

pub(crate) fn outcome_to_receipt(outcome: CallOutcome) -> Result<Receipt, ClientError> {
    match outcome {
        CallOutcome::Confirmed { receipt } => Ok(receipt),
        CallOutcome::Failed { code, message } => Err(ClientError::Rejected { code, message }),
    }
}

/// In-process provider over a shared ledger.
pub struct LocalProvider<S> {
    ledger: Arc<IdentityLedger<S>>,
    keypair: Option<KeyPair>,
    outcomes: Mutex<HashMap<Hash256, CallOutcome>>,
}

impl<S: LedgerStore> LocalProvider<S> {
    /// A read-only provider.
    pub fn new(ledger: Arc<IdentityLedger<S>>) -> Self {
        Self {
            ledger,
            keypair: None,
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    /// Sign calls with `keypair`.
    pub fn with_signer(mut self, keypair: KeyPair) -> Self {
        self.keypair = Some(keypair);
        self
    }

    pub fn ledger(&self) -> &Arc<IdentityLedger<S>> {
        &self.ledger
    }

    fn outcomes(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Hash256, CallOutcome>>, ClientError> {
        self.outcomes
            .lock()
            .map_err(|_| ClientError::Node("outcome map poisoned".into()))
    }
}

impl<S: LedgerStore> Provider for LocalProvider<S> {
    fn current_account(&self) -> Option<AccountAddress> {
        self.keypair.as_ref().map(|kp| derive_address(&kp.public))
    }

    async fn read_state(&self, query: Query) -> Result<QueryResponse, ClientError> {
        Ok(self.ledger.query(&query)?)
    }

    async fn submit_transaction(&self, call: Call) -> Result<Hash256, ClientError> {
        let keypair = self.keypair.as_ref().ok_or(ClientError::NotConnected)?;
        let sender = derive_address(&keypair.public);
        let network = self.ledger.params().network;
        let nonce = self.ledger.nonce(&sender)?;
        let signed = SignedCall::sign(call, keypair, nonce, self.ledger.now(), network)?;
        let tx_hash = signed.hash(network)?;

        let outcome = match self.ledger.submit(&signed) {
            Ok(receipt) => CallOutcome::Confirmed { receipt },
            Err(e) if e.is_permanent() => CallOutcome::Failed {
                code: e.code().to_string(),
                message: e.to_string(),
            },
            Err(e) => return Err(e.into()),
        };
        self.outcomes()?.insert(tx_hash, outcome);
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: Hash256) -> Result<Receipt, ClientError> {
        let outcome = self
            .outcomes()?
            .get(&tx_hash)
            .cloned()
            .ok_or(ClientError::ConfirmationTimeout(tx_hash))?;
        outcome_to_receipt(outcome)
    }
}
