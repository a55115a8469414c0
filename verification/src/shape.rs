//! Structural proof checks.

use crate::VerificationError;
use zkid_types::{FieldElement, Hash256, Proof};

const PROOF_HASH_DOMAIN: &[u8] = b"zkid-proof-v1";

fn all_zero<'a>(coords: impl IntoIterator<Item = &'a FieldElement>) -> bool {
    coords.into_iter().all(FieldElement::is_zero)
}

/// Reject proofs with a zero group element or no public inputs.
///
/// A point is zero only when every one of its coordinates is zero.
pub fn validate_proof_shape(proof: &Proof) -> Result<(), VerificationError> {
    if all_zero(&proof.a) {
        return Err(VerificationError::InvalidProofShape("a is zero"));
    }
    if all_zero(proof.b.iter().flatten()) {
        return Err(VerificationError::InvalidProofShape("b is zero"));
    }
    if all_zero(&proof.c) {
        return Err(VerificationError::InvalidProofShape("c is zero"));
    }
    if proof.public_inputs.is_empty() {
        return Err(VerificationError::InvalidProofShape("no public inputs"));
    }
    Ok(())
}

/// Digest identifying a proof submission: every proof element followed by
/// the separately supplied public inputs.
pub fn hash_proof(proof: &Proof, public_inputs: &[FieldElement]) -> Hash256 {
    let mut parts: Vec<&[u8]> = vec![PROOF_HASH_DOMAIN];
    parts.extend(proof.elements().map(|e| &e.as_bytes()[..]));
    parts.extend(public_inputs.iter().map(|e| &e.as_bytes()[..]));
    zkid_crypto::hash256_multi(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    fn valid() -> Proof {
        Proof {
            a: [fe(1), fe(2)],
            b: [[fe(3), fe(4)], [fe(5), fe(6)]],
            c: [fe(7), fe(8)],
            public_inputs: vec![fe(9)],
        }
    }

    #[test]
    fn accepts_valid_proof() {
        assert!(validate_proof_shape(&valid()).is_ok());
    }

    #[test]
    fn partially_zero_point_is_not_zero() {
        let mut p = valid();
        p.a = [FieldElement::ZERO, fe(1)];
        p.b = [[FieldElement::ZERO; 2], [fe(1), FieldElement::ZERO]];
        assert!(validate_proof_shape(&p).is_ok());
    }

    #[test]
    fn rejects_each_zero_component() {
        let mut p = valid();
        p.a = [FieldElement::ZERO; 2];
        assert_eq!(
            validate_proof_shape(&p),
            Err(VerificationError::InvalidProofShape("a is zero"))
        );

        let mut p = valid();
        p.b = [[FieldElement::ZERO; 2]; 2];
        assert!(validate_proof_shape(&p).is_err());

        let mut p = valid();
        p.c = [FieldElement::ZERO; 2];
        assert!(validate_proof_shape(&p).is_err());
    }

    #[test]
    fn rejects_empty_public_inputs() {
        let mut p = valid();
        p.public_inputs.clear();
        assert_eq!(
            validate_proof_shape(&p),
            Err(VerificationError::InvalidProofShape("no public inputs"))
        );
    }

    #[test]
    fn proof_hash_covers_call_inputs() {
        let p = valid();
        assert_eq!(hash_proof(&p, &[fe(1)]), hash_proof(&p, &[fe(1)]));
        assert_ne!(hash_proof(&p, &[fe(1)]), hash_proof(&p, &[fe(2)]));
        assert_ne!(hash_proof(&p, &[]), hash_proof(&valid(), &[fe(1)]));
    }
}
