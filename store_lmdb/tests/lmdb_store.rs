use zkid_store::{
    AttributeStore, IdentityStore, LedgerStore, MetaStore, NonceStore, NullifierStore,
    RegistryStore, StoreError, StoreOp, WriteBatch,
};
use zkid_store_lmdb::{check_integrity, LmdbStore, SCHEMA_VERSION};
use zkid_types::{
    AccountAddress, AttributeType, Hash256, IdentityRecord, Timestamp, VerificationLevel,
};

const MAP_SIZE: usize = 10 * 1024 * 1024;

fn account(b: u8) -> AccountAddress {
    AccountAddress::new([b; 20])
}

fn batch(ops: Vec<StoreOp>) -> WriteBatch {
    ops.into_iter().collect()
}

fn open(dir: &tempfile::TempDir) -> LmdbStore {
    LmdbStore::open(dir.path(), MAP_SIZE).unwrap()
}

#[test]
fn fresh_store_is_empty_and_stamped() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    assert_eq!(store.identity_count().unwrap(), 0);
    assert_eq!(store.get_owner().unwrap(), None);
    assert_eq!(store.get_nonce(&account(1)).unwrap(), 0);
    assert_eq!(store.get_schema_version().unwrap(), Some(SCHEMA_VERSION));
    assert!(check_integrity(store.env()).unwrap().is_healthy());
}

#[test]
fn identity_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let record = IdentityRecord::registered(
        Hash256::new([3; 32]),
        VerificationLevel::Basic,
        Timestamp::new(1_700_000_000),
    );
    {
        let store = open(&dir);
        store
            .commit(batch(vec![
                StoreOp::InsertNullifier(Hash256::new([4; 32])),
                StoreOp::PutIdentity {
                    account: account(1),
                    record,
                },
                StoreOp::SetOwner(Some(account(9))),
                StoreOp::SetNonce {
                    account: account(1),
                    nonce: 7,
                },
            ]))
            .unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.get_identity(&account(1)).unwrap(), Some(record));
    assert!(store.is_nullifier_used(&Hash256::new([4; 32])).unwrap());
    assert_eq!(store.get_owner().unwrap(), Some(account(9)));
    assert_eq!(store.get_nonce(&account(1)).unwrap(), 7);
}

#[test]
fn duplicate_nullifier_rolls_back_batch() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let n = Hash256::new([5; 32]);
    store.commit(batch(vec![StoreOp::InsertNullifier(n)])).unwrap();

    let result = store.commit(batch(vec![
        StoreOp::PutIdentity {
            account: account(2),
            record: IdentityRecord::default(),
        },
        StoreOp::InsertNullifier(n),
    ]));
    assert!(matches!(result, Err(StoreError::Duplicate(_))));
    assert_eq!(store.get_identity(&account(2)).unwrap(), None);
    assert_eq!(store.nullifier_count().unwrap(), 1);
}

#[test]
fn attributes_scan_only_own_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    store
        .commit(batch(vec![
            StoreOp::SetAttributeVerified {
                account: account(1),
                attribute: AttributeType::Nationality,
            },
            StoreOp::SetAttributeVerified {
                account: account(1),
                attribute: AttributeType::AgeOver18,
            },
            StoreOp::SetAttributeVerified {
                account: account(2),
                attribute: AttributeType::Custom,
            },
        ]))
        .unwrap();

    assert_eq!(
        store.verified_attributes(&account(1)).unwrap(),
        vec![AttributeType::AgeOver18, AttributeType::Nationality]
    );
    assert!(store
        .is_attribute_verified(&account(2), AttributeType::Custom)
        .unwrap());
    assert!(!store
        .is_attribute_verified(&account(1), AttributeType::Custom)
        .unwrap());
}

#[test]
fn registry_and_access_control() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let vk = Hash256::new([8; 32]);
    store
        .commit(batch(vec![
            StoreOp::PutVerificationKey {
                attribute: AttributeType::AgeOver21,
                vk_hash: vk,
            },
            StoreOp::SetVerifierAuthorization {
                verifier: account(5),
                authorized: true,
            },
            StoreOp::SetOwner(Some(account(1))),
            StoreOp::MarkInitialized,
        ]))
        .unwrap();
    assert!(store.is_initialized().unwrap());
    assert_eq!(
        store.get_verification_key(AttributeType::AgeOver21).unwrap(),
        Some(vk)
    );
    assert_eq!(store.get_verification_key(AttributeType::Custom).unwrap(), None);
    assert!(store.is_authorized_verifier(&account(5)).unwrap());

    store
        .commit(batch(vec![
            StoreOp::SetVerifierAuthorization {
                verifier: account(5),
                authorized: false,
            },
            StoreOp::SetOwner(None),
        ]))
        .unwrap();
    assert!(!store.is_authorized_verifier(&account(5)).unwrap());
    assert_eq!(store.get_owner().unwrap(), None);
    assert!(store.is_initialized().unwrap());
}

#[test]
fn schema_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = open(&dir);
        store.set_schema_version(SCHEMA_VERSION + 1).unwrap();
    }
    assert!(matches!(
        LmdbStore::open(dir.path(), MAP_SIZE),
        Err(zkid_store_lmdb::LmdbError::SchemaMismatch { .. })
    ));
}
