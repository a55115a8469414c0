//! HTTP provider talking to a node's JSON RPC.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use zkid_crypto::derive_address;
use zkid_ledger::DeploymentInfo;
use zkid_transactions::{Call, CallOutcome, Query, QueryResponse, Receipt, SignedCall};
use zkid_types::{AccountAddress, Hash256, KeyPair, NetworkId, Timestamp};

use crate::error::ClientError;
use crate::provider::{outcome_to_receipt, Provider};

/// Response from the `submit` action.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResult {
    pub tx_hash: Hash256,
    pub outcome: CallOutcome,
}

/// HTTP client for a ZKID node.
///
/// Wraps `reqwest::Client` with the node's base URL. Without a signer it can
/// only read.
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
    network: NetworkId,
    signer: Option<KeyPair>,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl NodeClient {
    /// A client for the node at `node_url` (e.g. `http://127.0.0.1:27077`).
    pub fn new(node_url: impl Into<String>, network: NetworkId) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Node(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
            network,
            signer: None,
            poll_interval: Duration::from_millis(250),
            poll_attempts: 40,
        })
    }

    pub fn with_signer(mut self, keypair: KeyPair) -> Self {
        self.signer = Some(keypair);
        self
    }

    /// How often and how many times `await_confirmation` polls.
    pub fn with_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts.max(1);
        self
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// POST a request body. Returns `None` for 404.
    async fn rpc_call(&self, body: &Value) -> Result<Option<Value>, ClientError> {
        let response = self
            .http
            .post(&self.node_url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Node(format!("request failed: {e}")))?;

        let status = response.status();
        let json: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Node(format!("invalid JSON response: {e}")))?;

        if status.is_success() {
            return Ok(Some(json));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let code = json
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("rejected")
                .to_string();
            return Err(ClientError::Rejected { code, message });
        }
        Err(ClientError::Node(format!("node returned HTTP {status}: {message}")))
    }

    async fn call_typed<T: DeserializeOwned>(&self, body: Value) -> Result<T, ClientError> {
        let value = self
            .rpc_call(&body)
            .await?
            .ok_or_else(|| ClientError::UnexpectedResponse("not found".into()))?;
        serde_json::from_value(value).map_err(|e| ClientError::UnexpectedResponse(e.to_string()))
    }

    pub async fn query(&self, query: &Query) -> Result<QueryResponse, ClientError> {
        let body = serde_json::to_value(query)
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))?;
        self.call_typed(body).await
    }

    pub async fn submit(&self, call: &SignedCall) -> Result<SubmitResult, ClientError> {
        self.call_typed(json!({ "action": "submit", "call": call }))
            .await
    }

    /// Outcome of a recently submitted call, `None` if the node has none.
    pub async fn receipt(&self, tx_hash: &Hash256) -> Result<Option<CallOutcome>, ClientError> {
        match self
            .rpc_call(&json!({ "action": "receipt", "tx_hash": tx_hash }))
            .await?
        {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ClientError::UnexpectedResponse(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn deployment_info(&self) -> Result<DeploymentInfo, ClientError> {
        self.call_typed(json!({ "action": "deployment_info" }))
            .await
    }

    pub async fn nonce(&self, account: &AccountAddress) -> Result<u64, ClientError> {
        self.query(&Query::Nonce { account: *account })
            .await?
            .as_nonce()
            .ok_or_else(|| ClientError::UnexpectedResponse("expected nonce".into()))
    }
}

impl Provider for NodeClient {
    fn current_account(&self) -> Option<AccountAddress> {
        self.signer.as_ref().map(|kp| derive_address(&kp.public))
    }

    async fn read_state(&self, query: Query) -> Result<QueryResponse, ClientError> {
        self.query(&query).await
    }

    async fn submit_transaction(&self, call: Call) -> Result<Hash256, ClientError> {
        let keypair = self.signer.as_ref().ok_or(ClientError::NotConnected)?;
        let nonce = self.nonce(&derive_address(&keypair.public)).await?;
        let signed = SignedCall::sign(call, keypair, nonce, Timestamp::now(), self.network)?;
        let result = self.submit(&signed).await?;
        debug!(
            tx_hash = %result.tx_hash,
            confirmed = result.outcome.is_confirmed(),
            "call submitted"
        );
        Ok(result.tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: Hash256) -> Result<Receipt, ClientError> {
        for attempt in 0..self.poll_attempts {
            if let Some(outcome) = self.receipt(&tx_hash).await? {
                return outcome_to_receipt(outcome);
            }
            if attempt + 1 < self.poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
        Err(ClientError::ConfirmationTimeout(tx_hash))
    }
}
