//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use zkid_store::StoreError;

use crate::LmdbError;

/// Current on-disk layout version.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";
pub(crate) const OWNER_KEY: &[u8] = b"owner";
pub(crate) const INITIALIZED_KEY: &[u8] = b"initialized";

/// Names of every database the store creates.
pub const DATABASES: &[&str] = &[
    "identities",
    "nullifiers",
    "attributes",
    "verification_keys",
    "verifiers",
    "nonces",
    "meta",
];

/// Wraps the LMDB environment and all database handles.
///
/// Keys are raw fixed-width bytes; identity records are bincode-encoded.
pub struct LmdbStore {
    pub(crate) env: Env,
    path: PathBuf,
    /// address -> IdentityRecord
    pub(crate) identities_db: Database<Bytes, Bytes>,
    /// nullifier -> ()
    pub(crate) nullifiers_db: Database<Bytes, Bytes>,
    /// address ++ attribute code -> ()
    pub(crate) attributes_db: Database<Bytes, Bytes>,
    /// attribute code -> vk hash
    pub(crate) verification_keys_db: Database<Bytes, Bytes>,
    /// address -> ()
    pub(crate) verifiers_db: Database<Bytes, Bytes>,
    /// address -> u64 big-endian
    pub(crate) nonces_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open or create an LMDB environment at the given path.
    ///
    /// A new database is stamped with [`SCHEMA_VERSION`]; an existing one
    /// must carry the same version.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per path by this process and
        // never by a second `Env` at the same time.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(DATABASES.len() as u32)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let identities_db = env.create_database(&mut wtxn, Some("identities"))?;
        let nullifiers_db = env.create_database(&mut wtxn, Some("nullifiers"))?;
        let attributes_db = env.create_database(&mut wtxn, Some("attributes"))?;
        let verification_keys_db = env.create_database(&mut wtxn, Some("verification_keys"))?;
        let verifiers_db = env.create_database(&mut wtxn, Some("verifiers"))?;
        let nonces_db = env.create_database(&mut wtxn, Some("nonces"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;

        match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
            }
            Some(bytes) => {
                let found = decode_u32(bytes)?;
                if found != SCHEMA_VERSION {
                    return Err(LmdbError::SchemaMismatch {
                        found,
                        expected: SCHEMA_VERSION,
                    });
                }
            }
        }
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env,
            path: path.to_path_buf(),
            identities_db,
            nullifiers_db,
            attributes_db,
            verification_keys_db,
            verifiers_db,
            nonces_db,
            meta_db,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying heed environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&heed::RoTxn<'_>) -> Result<T, LmdbError>,
    ) -> Result<T, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(f(&rtxn)?)
    }
}

pub(crate) fn decode_u32(bytes: &[u8]) -> Result<u32, LmdbError> {
    let arr: [u8; 4] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization(format!("expected 4 bytes, got {}", bytes.len())))?;
    Ok(u32::from_le_bytes(arr))
}

pub(crate) fn decode_fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], LmdbError> {
    bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization(format!("expected {N} bytes, got {}", bytes.len())))
}
