//! LMDB storage backend for the ZKID identity ledger.
//!
//! Implements all storage traits from `zkid-store` using the `heed` LMDB
//! bindings. Each logical table maps to one LMDB database within a single
//! environment; a ledger write batch commits in one LMDB write transaction.

pub mod environment;
pub mod error;
pub mod integrity;
mod tables;
mod write_batch;

pub use environment::{LmdbStore, SCHEMA_VERSION};
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
