//! Read-only ledger queries and their responses.
//!
//! On the wire a query is a JSON object tagged by `action`, e.g.
//! `{"action":"verification_level","user":"0x…"}`.

use serde::{Deserialize, Serialize};
use zkid_types::{
    AccountAddress, AttributeType, Hash256, IdentityRecord, Timestamp, VerificationLevel,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Query {
    /// The identity record of `user` (zero record when absent).
    Identity { user: AccountAddress },
    VerificationLevel { user: AccountAddress },
    HasVerifiedAttribute {
        user: AccountAddress,
        attribute: AttributeType,
    },
    /// Certificate hash for `caller` over `attributes`.
    GenerateCertificate {
        caller: AccountAddress,
        attributes: Vec<AttributeType>,
    },
    VerifyCertificate {
        user: AccountAddress,
        attributes: Vec<AttributeType>,
        certificate_hash: Hash256,
        timestamp: Timestamp,
    },
    /// Registered key hash (zero when unset).
    VerificationKey { attribute: AttributeType },
    NullifierUsed { nullifier: Hash256 },
    AuthorizedVerifier { account: AccountAddress },
    Owner,
    /// Next nonce expected from `account`.
    Nonce { account: AccountAddress },
}

impl Query {
    /// The `action` tag of this query.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity { .. } => "identity",
            Self::VerificationLevel { .. } => "verification_level",
            Self::HasVerifiedAttribute { .. } => "has_verified_attribute",
            Self::GenerateCertificate { .. } => "generate_certificate",
            Self::VerifyCertificate { .. } => "verify_certificate",
            Self::VerificationKey { .. } => "verification_key",
            Self::NullifierUsed { .. } => "nullifier_used",
            Self::AuthorizedVerifier { .. } => "authorized_verifier",
            Self::Owner => "owner",
            Self::Nonce { .. } => "nonce",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryResponse {
    Identity(IdentityRecord),
    Level(VerificationLevel),
    Bool(bool),
    Hash(Hash256),
    Owner(Option<AccountAddress>),
    Nonce(u64),
}

impl QueryResponse {
    pub fn as_identity(&self) -> Option<&IdentityRecord> {
        match self {
            Self::Identity(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_level(&self) -> Option<VerificationLevel> {
        match self {
            Self::Level(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<Hash256> {
        match self {
            Self::Hash(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_owner(&self) -> Option<Option<AccountAddress>> {
        match self {
            Self::Owner(o) => Some(*o),
            _ => None,
        }
    }

    pub fn as_nonce(&self) -> Option<u64> {
        match self {
            Self::Nonce(n) => Some(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_tagged_by_action() {
        let q = Query::HasVerifiedAttribute {
            user: AccountAddress::new([1; 20]),
            attribute: AttributeType::AgeOver21,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["action"], q.name());
        assert_eq!(json["attribute"], 1);
        let back: Query = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn unit_query_parses() {
        let q: Query = serde_json::from_str(r#"{"action":"owner"}"#).unwrap();
        assert_eq!(q, Query::Owner);
    }

    #[test]
    fn response_accessors() {
        assert_eq!(QueryResponse::Bool(true).as_bool(), Some(true));
        assert_eq!(QueryResponse::Bool(true).as_hash(), None);
        assert_eq!(QueryResponse::Owner(None).as_owner(), Some(None));
    }

    #[test]
    fn response_json_is_adjacently_tagged() {
        let json = serde_json::to_value(QueryResponse::Nonce(3)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "nonce", "value": 3}));
        let back: QueryResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, QueryResponse::Nonce(3));
    }
}
