//! Events emitted by successful writes.

use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, AttributeType, Hash256, VerificationLevel};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    IdentityRegistered {
        account: AccountAddress,
        commitment: Hash256,
        level: VerificationLevel,
    },
    AttributeVerified {
        account: AccountAddress,
        attribute: AttributeType,
        proof_hash: Hash256,
    },
    VerificationLevelUpdated {
        account: AccountAddress,
        new_level: VerificationLevel,
    },
    VerifierAuthorized {
        verifier: AccountAddress,
        authorized: bool,
    },
    OwnershipTransferred {
        previous: Option<AccountAddress>,
        new: Option<AccountAddress>,
    },
}

impl LedgerEvent {
    /// Stable name used in logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdentityRegistered { .. } => "identity_registered",
            Self::AttributeVerified { .. } => "attribute_verified",
            Self::VerificationLevelUpdated { .. } => "verification_level_updated",
            Self::VerifierAuthorized { .. } => "verifier_authorized",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }
}
