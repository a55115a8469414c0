//! State-changing ledger calls.

use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, AttributeType, FieldElement, Hash256, Proof, VerificationLevel};

/// A state-changing operation. The caller is not part of the call; it is the
/// account derived from the key that signs the enclosing envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    RegisterIdentity {
        commitment: Hash256,
        proof: Proof,
        nullifier: Hash256,
    },
    VerifyAttribute {
        attribute: AttributeType,
        proof: Proof,
        public_inputs: Vec<FieldElement>,
    },
    SetVerificationKey {
        attribute: AttributeType,
        vk_hash: Hash256,
    },
    AuthorizeVerifier {
        verifier: AccountAddress,
        authorized: bool,
    },
    UpdateVerificationLevel {
        user: AccountAddress,
        level: VerificationLevel,
    },
    TransferOwnership {
        new_owner: AccountAddress,
    },
    RenounceOwnership,
}

impl Call {
    /// Stable name used in logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterIdentity { .. } => "register_identity",
            Self::VerifyAttribute { .. } => "verify_attribute",
            Self::SetVerificationKey { .. } => "set_verification_key",
            Self::AuthorizeVerifier { .. } => "authorize_verifier",
            Self::UpdateVerificationLevel { .. } => "update_verification_level",
            Self::TransferOwnership { .. } => "transfer_ownership",
            Self::RenounceOwnership => "renounce_ownership",
        }
    }

    /// Whether the call is restricted to the owner (or, for level updates,
    /// an authorized verifier).
    pub fn is_admin(&self) -> bool {
        !matches!(
            self,
            Self::RegisterIdentity { .. } | Self::VerifyAttribute { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case_and_match_json_tag() {
        let call = Call::AuthorizeVerifier {
            verifier: AccountAddress::new([1; 20]),
            authorized: true,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert!(json.get(call.name()).is_some());
        assert_eq!(
            serde_json::to_value(Call::RenounceOwnership).unwrap(),
            serde_json::json!("renounce_ownership")
        );
    }

    #[test]
    fn user_calls_are_not_admin() {
        let call = Call::TransferOwnership {
            new_owner: AccountAddress::new([2; 20]),
        };
        assert!(call.is_admin());
        assert!(!Call::RegisterIdentity {
            commitment: Hash256::ZERO,
            proof: Proof {
                a: [FieldElement::ZERO; 2],
                b: [[FieldElement::ZERO; 2]; 2],
                c: [FieldElement::ZERO; 2],
                public_inputs: vec![],
            },
            nullifier: Hash256::ZERO,
        }
        .is_admin());
    }
}
