//! Calls, signed call envelopes, queries, events and receipts for the ZKID
//! identity ledger.
//!
//! Write paths:
//! - **RegisterIdentity**: bind a commitment to the caller, spending a nullifier
//! - **VerifyAttribute**: record a proven attribute for the caller
//! - **SetVerificationKey**: owner installs the key hash for an attribute
//! - **AuthorizeVerifier**: owner grants or revokes level-admin rights
//! - **UpdateVerificationLevel**: owner or authorized verifier raises a level
//! - **TransferOwnership** / **RenounceOwnership**: owner hand-over
//!
//! Every write travels inside a [`SignedCall`]; reads are [`Query`] values.

pub mod call;
pub mod error;
pub mod event;
pub mod query;
pub mod receipt;
pub mod signed;
pub mod validation;

pub use call::Call;
pub use error::TransactionError;
pub use event::LedgerEvent;
pub use query::{Query, QueryResponse};
pub use receipt::{CallOutcome, Receipt};
pub use signed::SignedCall;
pub use validation::validate_signed_call;
