//! Wallet-side client for the ZKID identity ledger.
//!
//! Provides everything a wallet application needs:
//! - A [`Provider`] abstraction over the ledger connection, with an HTTP
//!   implementation ([`NodeClient`]) and an in-process one ([`LocalProvider`])
//! - Call signing with the account's nonce
//! - [`IdentityClient`]: identity status, registration, attribute
//!   verification, certificate generation and checking
//! - Mock proof, commitment and nullifier helpers for demos and tests

pub mod client;
pub mod error;
pub mod mock;
pub mod node_client;
pub mod provider;

pub use client::{IdentityClient, IdentityStatus};
pub use error::ClientError;
pub use mock::{create_mock_identity_commitment, create_mock_nullifier, create_mock_zk_proof};
pub use node_client::{NodeClient, SubmitResult};
pub use provider::{LocalProvider, Provider};
