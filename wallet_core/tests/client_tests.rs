//! Identity client flows against an in-process ledger and a live RPC node.

use std::sync::Arc;
use std::time::Duration;

use zkid_crypto::{derive_address, keypair_from_seed};
use zkid_ledger::IdentityLedger;
use zkid_nullables::NullStore;
use zkid_rpc::{RpcServer, RpcState};
use zkid_types::{AttributeType, FieldElement, LedgerParams, NetworkId};
use zkid_wallet_core::{
    create_mock_identity_commitment, create_mock_nullifier, create_mock_zk_proof, ClientError,
    IdentityClient, LocalProvider, NodeClient, Provider,
};

fn shared_ledger() -> Arc<IdentityLedger<NullStore>> {
    let ledger = IdentityLedger::new(NullStore::new(), LedgerParams::default());
    let owner = derive_address(&keypair_from_seed(&[0xAA; 32]).public);
    ledger.initialize(&owner).unwrap();
    ledger.provision_verification_keys(&owner).unwrap();
    Arc::new(ledger)
}

fn local_client(
    ledger: &Arc<IdentityLedger<NullStore>>,
    seed: u8,
) -> IdentityClient<LocalProvider<NullStore>> {
    let provider =
        LocalProvider::new(Arc::clone(ledger)).with_signer(keypair_from_seed(&[seed; 32]));
    IdentityClient::new(provider)
}

async fn register(client: &IdentityClient<impl Provider>, salt: u64) -> Result<(), ClientError> {
    let account = client.provider().current_account().unwrap();
    client
        .register_identity(
            create_mock_identity_commitment("Jane Doe, 1990-01-01", &account),
            create_mock_zk_proof("registration-proof-seed"),
            create_mock_nullifier("my secret", &account, salt),
        )
        .await
        .map(|_| ())
}

#[tokio::test]
async fn unregistered_account_has_no_identity() {
    let ledger = shared_ledger();
    let client = local_client(&ledger, 1);

    let status = client.check_identity().await.unwrap();
    assert!(status.identity.is_none());
    assert!(!status.is_registered());
    assert!(!status.has_basic_verification());
}

#[tokio::test]
async fn register_verify_and_certify() {
    let ledger = shared_ledger();
    let client = local_client(&ledger, 1);
    register(&client, 1).await.unwrap();

    let status = client.check_identity().await.unwrap();
    assert!(status.is_registered());
    assert!(status.has_basic_verification());
    assert!(!status.has_enhanced_verification());

    client
        .verify_attribute(
            AttributeType::AgeOver18,
            create_mock_zk_proof("age-over-18-proof"),
            vec![FieldElement::from_u64(1)],
        )
        .await
        .unwrap();
    let status = client.check_identity().await.unwrap();
    assert_eq!(
        status.verified_attributes.iter().copied().collect::<Vec<_>>(),
        vec![AttributeType::AgeOver18]
    );

    let certificate = client
        .generate_certificate(vec![AttributeType::AgeOver18])
        .await
        .unwrap();
    let me = client.provider().current_account().unwrap();
    assert!(client.verify_certificate(me, &certificate).await.unwrap());

    // A relying party without a wallet can check it too.
    let reader = IdentityClient::new(LocalProvider::new(Arc::clone(&ledger)));
    assert!(reader.verify_certificate(me, &certificate).await.unwrap());
    let someone_else = derive_address(&keypair_from_seed(&[2; 32]).public);
    assert!(!reader.verify_certificate(someone_else, &certificate).await.unwrap());
}

#[tokio::test]
async fn ledger_rejections_surface_with_their_code() {
    let ledger = shared_ledger();
    let client = local_client(&ledger, 1);
    register(&client, 1).await.unwrap();

    let err = register(&client, 2).await.unwrap_err();
    assert_eq!(err.rejection_code(), Some("already_registered"));

    let err = client
        .generate_certificate(vec![AttributeType::Nationality])
        .await
        .unwrap_err();
    assert_eq!(err.rejection_code(), Some("attribute_not_verified"));
}

#[tokio::test]
async fn own_identity_needs_a_signer() {
    let ledger = shared_ledger();
    let reader = IdentityClient::new(LocalProvider::new(ledger));
    assert!(matches!(
        reader.check_identity().await,
        Err(ClientError::NotConnected)
    ));
}

#[tokio::test]
async fn node_client_round_trip() {
    let ledger = shared_ledger();
    let state = Arc::new(RpcState::new(Arc::clone(&ledger), 64).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(RpcServer::new(addr.port(), state).serve(listener, async move {
        let _ = stop_rx.await;
    }));

    let node = NodeClient::new(format!("http://{addr}"), NetworkId::Dev)
        .unwrap()
        .with_signer(keypair_from_seed(&[7; 32]))
        .with_polling(Duration::from_millis(10), 5);
    let client = IdentityClient::new(node);

    register(&client, 1).await.unwrap();
    let status = client.check_identity().await.unwrap();
    assert!(status.is_registered());

    let err = register(&client, 2).await.unwrap_err();
    assert_eq!(err.rejection_code(), Some("already_registered"));

    let info = client.provider().deployment_info().await.unwrap();
    assert_eq!(info.identities, 1);
    assert_eq!(info.network, NetworkId::Dev);

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
