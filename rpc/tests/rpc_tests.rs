//! RPC dispatch and HTTP serving against an in-memory ledger.

use std::sync::Arc;

use serde_json::{json, Value};
use zkid_crypto::{derive_address, keypair_from_seed};
use zkid_ledger::IdentityLedger;
use zkid_nullables::{NullClock, NullStore};
use zkid_rpc::{dispatch, RpcError, RpcRequest, RpcServer, RpcState, SubmitResponse};
use zkid_transactions::{Call, CallOutcome, SignedCall};
use zkid_types::{FieldElement, Hash256, LedgerParams, NetworkId, Proof, Timestamp};

const T0: u64 = 1_700_000_000;

fn state() -> Arc<RpcState<NullStore>> {
    let ledger = IdentityLedger::new(NullStore::new(), LedgerParams::default())
        .with_clock(NullClock::new(T0));
    Arc::new(RpcState::new(Arc::new(ledger), 16).unwrap())
}

fn proof() -> Proof {
    let fe = FieldElement::from_u64;
    Proof {
        a: [fe(1), fe(2)],
        b: [[fe(3), fe(4)], [fe(5), fe(6)]],
        c: [fe(7), fe(8)],
        public_inputs: vec![fe(1)],
    }
}

fn register_call(seed: u8, nonce: u64) -> SignedCall {
    let kp = keypair_from_seed(&[seed; 32]);
    let call = Call::RegisterIdentity {
        commitment: Hash256::new([seed; 32]),
        proof: proof(),
        nullifier: Hash256::new([0x40; 32]),
    };
    SignedCall::sign(call, &kp, nonce, Timestamp::new(T0), NetworkId::Dev).unwrap()
}

fn request(body: Value) -> RpcRequest {
    RpcRequest::from_value(body).unwrap()
}

#[test]
fn submit_then_receipt() {
    let state = state();
    let call = register_call(1, 0);

    let value = dispatch(&state, request(json!({ "action": "submit", "call": call }))).unwrap();
    let submitted: SubmitResponse = serde_json::from_value(value).unwrap();
    assert!(submitted.outcome.is_confirmed());

    let value = dispatch(
        &state,
        request(json!({ "action": "receipt", "tx_hash": submitted.tx_hash })),
    )
    .unwrap();
    let outcome: CallOutcome = serde_json::from_value(value).unwrap();
    assert_eq!(outcome, submitted.outcome);
}

#[test]
fn rejected_submit_is_recorded_as_failed() {
    let state = state();
    dispatch(&state, request(json!({ "action": "submit", "call": register_call(1, 0) }))).unwrap();

    // Same nullifier from another account.
    let value = dispatch(
        &state,
        request(json!({ "action": "submit", "call": register_call(2, 0) })),
    )
    .unwrap();
    let submitted: SubmitResponse = serde_json::from_value(value).unwrap();
    match submitted.outcome {
        CallOutcome::Failed { code, .. } => assert_eq!(code, "nullifier_reused"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(state.outcomes().unwrap().len(), 2);
    assert_eq!(state.metrics.calls_failed.get(), 1);
}

#[test]
fn unknown_receipt_is_not_found() {
    let state = state();
    let err = dispatch(
        &state,
        request(json!({ "action": "receipt", "tx_hash": Hash256::new([9; 32]) })),
    )
    .unwrap_err();
    assert!(matches!(err, RpcError::NotFound(_)));
}

#[test]
fn queries_answer_through_the_ledger() {
    let state = state();
    let call = register_call(1, 0);
    let sender = derive_address(&call.public_key);
    dispatch(&state, request(json!({ "action": "submit", "call": call }))).unwrap();

    let value = dispatch(&state, request(json!({ "action": "identity", "user": sender }))).unwrap();
    assert_eq!(value["type"], "identity");
    assert_eq!(value["value"]["is_active"], true);

    let value = dispatch(&state, request(json!({ "action": "nonce", "account": sender }))).unwrap();
    assert_eq!(value["value"], 1);

    let value = dispatch(&state, request(json!({ "action": "deployment_info" }))).unwrap();
    assert_eq!(value["identities"], 1);
}

#[tokio::test]
async fn serves_over_http() {
    let state = state();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(RpcServer::new(addr.port(), Arc::clone(&state)).serve(
        listener,
        async move {
            let _ = stop_rx.await;
        },
    ));

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let response = client
        .post(&base)
        .json(&json!({ "action": "owner" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "type": "owner", "value": null }));

    let response = client
        .post(&base)
        .json(&json!({ "action": "bogus" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "invalid_request");

    let metrics = client
        .get(format!("{base}/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("zkid_rpc_requests_total{action=\"owner\"} 1"));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
