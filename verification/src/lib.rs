//! Proof checking and level escalation.
//!
//! Two layers guard every write that carries a proof:
//! 1. **Shape**: [`validate_proof_shape`] rejects structurally empty proofs.
//! 2. **Verifier**: a pluggable [`ProofVerifier`] decides whether the proof
//!    holds against the relevant verification key.
//!
//! The ledger does not prescribe *how* proofs are checked. The bundled
//! [`ShapeOnlyVerifier`] accepts any well-shaped proof; a production
//! deployment plugs in a real SNARK verifier behind the same trait.
//!
//! Level escalation after attribute verification is likewise pluggable via
//! [`LevelPolicy`].

pub mod error;
pub mod policy;
pub mod shape;
pub mod verifier;

pub use error::VerificationError;
pub use policy::{AttributeCountPolicy, LevelPolicy, ManualLevelPolicy};
pub use shape::{hash_proof, validate_proof_shape};
pub use verifier::{KeyRef, ProofVerifier, ShapeOnlyVerifier};
