//! RPC request decoding and dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use zkid_store::LedgerStore;
use zkid_transactions::{CallOutcome, Query, SignedCall};
use zkid_types::Hash256;

use crate::error::RpcError;
use crate::server::RpcState;

/// Actions served by the node itself rather than by a ledger query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Submit { call: SignedCall },
    Receipt { tx_hash: Hash256 },
    DeploymentInfo,
}

const COMMAND_ACTIONS: [&str; 3] = ["submit", "receipt", "deployment_info"];

#[derive(Clone, Debug)]
pub enum RpcRequest {
    Command(Command),
    Query(Query),
}

impl RpcRequest {
    /// Decode a request body, routing on its `action` field.
    pub fn from_value(body: Value) -> Result<Self, RpcError> {
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::InvalidRequest("missing action".into()))?;
        let decoded = if COMMAND_ACTIONS.contains(&action) {
            serde_json::from_value(body).map(Self::Command)
        } else {
            serde_json::from_value(body).map(Self::Query)
        };
        decoded.map_err(|e| RpcError::InvalidRequest(e.to_string()))
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Command(Command::Submit { .. }) => "submit",
            Self::Command(Command::Receipt { .. }) => "receipt",
            Self::Command(Command::DeploymentInfo) => "deployment_info",
            Self::Query(q) => q.name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub tx_hash: Hash256,
    pub outcome: CallOutcome,
}

/// Execute one decoded request against the node state.
///
/// Ledger calls are synchronous; callers on an async runtime should run this
/// on a blocking thread.
pub fn dispatch<S: LedgerStore>(
    state: &RpcState<S>,
    request: RpcRequest,
) -> Result<Value, RpcError> {
    let value = match request {
        RpcRequest::Command(Command::Submit { call }) => to_value(submit(state, &call)?)?,
        RpcRequest::Command(Command::Receipt { tx_hash }) => {
            let outcomes = state.outcomes()?;
            let outcome = outcomes
                .get(&tx_hash)
                .ok_or_else(|| RpcError::NotFound(format!("no outcome for {tx_hash}")))?;
            to_value(outcome)?
        }
        RpcRequest::Command(Command::DeploymentInfo) => {
            to_value(state.ledger.deployment_info()?)?
        }
        RpcRequest::Query(query) => to_value(state.ledger.query(&query)?)?,
    };
    Ok(value)
}

fn submit<S: LedgerStore>(
    state: &RpcState<S>,
    call: &SignedCall,
) -> Result<SubmitResponse, RpcError> {
    let network = state.ledger.params().network;
    let tx_hash = call
        .hash(network)
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;

    let outcome = match state.ledger.submit(call) {
        Ok(receipt) => {
            state.metrics.calls_confirmed.inc();
            info!(%tx_hash, call = call.call.name(), "call confirmed");
            CallOutcome::Confirmed { receipt }
        }
        Err(e) if e.is_permanent() => {
            state.metrics.calls_failed.inc();
            debug!(%tx_hash, code = e.code(), "call failed");
            CallOutcome::Failed {
                code: e.code().to_string(),
                message: e.to_string(),
            }
        }
        Err(e) => return Err(e.into()),
    };

    state.outcomes()?.insert(tx_hash, outcome.clone());
    Ok(SubmitResponse { tx_hash, outcome })
}

fn to_value<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_and_queries_route_on_action() {
        let receipt = RpcRequest::from_value(json!({
            "action": "receipt",
            "tx_hash": Hash256::new([1; 32]),
        }))
        .unwrap();
        assert_eq!(receipt.action(), "receipt");

        let owner = RpcRequest::from_value(json!({ "action": "owner" })).unwrap();
        assert!(matches!(owner, RpcRequest::Query(Query::Owner)));
    }

    #[test]
    fn malformed_bodies_are_invalid_requests() {
        for body in [json!({}), json!({ "action": 5 }), json!({ "action": "nope" })] {
            assert!(matches!(
                RpcRequest::from_value(body),
                Err(RpcError::InvalidRequest(_))
            ));
        }
    }
}
