//! Identity verification ledger.
//!
//! Accounts register a commitment to their identity backed by a proof and a
//! single-use nullifier, then prove individual attributes against keys the
//! ledger owner registers. Certificates bind an account to a list of verified
//! attributes and are checked by recomputation, never stored.

pub mod certificate;
pub mod error;
pub mod events;
pub mod ledger;

pub use certificate::{certificate_hash, Certificate};
pub use error::LedgerError;
pub use events::EventBus;
pub use ledger::{DeploymentInfo, IdentityLedger};
