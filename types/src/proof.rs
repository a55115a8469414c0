//! Zero-knowledge proof envelope.

use crate::FieldElement;
use serde::{Deserialize, Serialize};

/// A Groth16-shaped proof: two G1 points `a` and `c`, one G2 point `b`, and
/// the public inputs the prover committed to.
///
/// This is an opaque structural value. Shape checks live in
/// `zkid_verification::validate_proof_shape`; cryptographic checks belong to a
/// `ProofVerifier` implementation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    pub a: [FieldElement; 2],
    pub b: [[FieldElement; 2]; 2],
    pub c: [FieldElement; 2],
    pub public_inputs: Vec<FieldElement>,
}

impl Proof {
    /// Every field element of the proof in canonical order: `a`, `b` row by
    /// row, `c`, then the public inputs.
    pub fn elements(&self) -> impl Iterator<Item = &FieldElement> {
        self.a
            .iter()
            .chain(self.b.iter().flatten())
            .chain(self.c.iter())
            .chain(self.public_inputs.iter())
    }
}
