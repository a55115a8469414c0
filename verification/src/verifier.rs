//! Pluggable proof verification.

use zkid_types::{AttributeType, FieldElement, Hash256, Proof};

/// Which verification key a proof is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRef {
    /// The identity registration circuit.
    Registration,
    /// An attribute circuit, with the key hash currently in the registry.
    Attribute(AttributeType, Hash256),
}

/// A pluggable proof verifier.
///
/// Called by both write paths after the shape check and before any state is
/// touched. Implementations must be deterministic for a given input.
pub trait ProofVerifier: Send + Sync {
    /// Human-readable name of this verifier.
    fn name(&self) -> &str;

    fn verify(&self, proof: &Proof, public_inputs: &[FieldElement], key: &KeyRef) -> bool;
}

/// Accepts every proof that passed the shape check.
///
/// Stands in for a real SNARK verifier until one is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeOnlyVerifier;

impl ProofVerifier for ShapeOnlyVerifier {
    fn name(&self) -> &str {
        "shape-only"
    }

    fn verify(&self, proof: &Proof, _public_inputs: &[FieldElement], _key: &KeyRef) -> bool {
        crate::validate_proof_shape(proof).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_only_follows_shape_check() {
        let fe = FieldElement::from_u64;
        let good = Proof {
            a: [fe(1), fe(1)],
            b: [[fe(1), fe(1)], [fe(1), fe(1)]],
            c: [fe(1), fe(1)],
            public_inputs: vec![fe(1)],
        };
        let mut bad = good.clone();
        bad.public_inputs.clear();

        let v = ShapeOnlyVerifier;
        assert!(v.verify(&good, &[], &KeyRef::Registration));
        assert!(!v.verify(&bad, &[], &KeyRef::Registration));
    }
}
