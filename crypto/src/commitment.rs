//! Client-side derivation of identity commitments, nullifiers and
//! verification key hashes.
//!
//! The ledger treats all three as opaque 256-bit values. These helpers give
//! wallets and operators a deterministic, domain-separated way to produce
//! them from secrets they already hold.

use zkid_types::{AccountAddress, AttributeType, Hash256};

const COMMITMENT_DOMAIN: &[u8] = b"zkid-commitment-v1";
const NULLIFIER_DOMAIN: &[u8] = b"zkid-nullifier-v1";

/// Commit to private identity data on behalf of `account`.
///
/// The commitment binds the data to the account so the same data committed
/// by two accounts yields unrelated values.
pub fn derive_identity_commitment(personal_data: &[u8], account: &AccountAddress) -> Hash256 {
    crate::hash256_multi(&[COMMITMENT_DOMAIN, account.as_bytes(), personal_data])
}

/// Derive a single-use nullifier from a secret.
///
/// `salt` lets one secret yield several nullifiers; wallets typically pass
/// the current time.
pub fn derive_nullifier(secret: &[u8], account: &AccountAddress, salt: u64) -> Hash256 {
    crate::hash256_multi(&[
        NULLIFIER_DOMAIN,
        account.as_bytes(),
        &salt.to_be_bytes(),
        secret,
    ])
}

/// The verification key hash provisioned by default for an attribute:
/// `H("verification_key_<code>")`.
pub fn verification_key_hash(attribute: AttributeType) -> Hash256 {
    crate::hash256(format!("verification_key_{}", attribute.code()).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(b: u8) -> AccountAddress {
        AccountAddress::new([b; 20])
    }

    #[test]
    fn commitment_binds_account() {
        let data = b"Jane Doe 1990-01-01";
        assert_ne!(
            derive_identity_commitment(data, &account(1)),
            derive_identity_commitment(data, &account(2))
        );
        assert_eq!(
            derive_identity_commitment(data, &account(1)),
            derive_identity_commitment(data, &account(1))
        );
    }

    #[test]
    fn nullifier_changes_with_salt() {
        let n1 = derive_nullifier(b"secret", &account(1), 1);
        let n2 = derive_nullifier(b"secret", &account(1), 2);
        assert_ne!(n1, n2);
    }

    #[test]
    fn commitment_and_nullifier_are_domain_separated() {
        let c = derive_identity_commitment(b"x", &account(3));
        let n = derive_nullifier(b"x", &account(3), 0);
        assert_ne!(c, n);
    }

    #[test]
    fn verification_keys_are_distinct_per_attribute() {
        let keys: std::collections::HashSet<_> = AttributeType::ALL
            .iter()
            .map(|a| verification_key_hash(*a))
            .collect();
        assert_eq!(keys.len(), AttributeType::ALL.len());
        assert_eq!(
            verification_key_hash(AttributeType::AgeOver18),
            crate::hash256(b"verification_key_0")
        );
    }
}
