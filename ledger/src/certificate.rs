//! Verification certificates.
//!
//! A certificate is never stored. Its hash is a pure function of the user,
//! the attribute list (in the order given) and the verification key
//! registered for each listed attribute, so it stays valid exactly as long
//! as that state is unchanged.

use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, AttributeType, Hash256, NetworkId, Timestamp};

const CERTIFICATE_DOMAIN: &[u8] = b"zkid-certificate-v1";

/// What a holder presents to a relying party.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub certificate_hash: Hash256,
    /// Issue time, seconds since epoch.
    pub timestamp: Timestamp,
    pub attribute_types: Vec<AttributeType>,
}

/// Compute the certificate hash.
///
/// `keys` pairs each listed attribute with its current key hash (zero when
/// unset), in the same order as the attribute list.
pub fn certificate_hash(
    network: NetworkId,
    user: &AccountAddress,
    keys: &[(AttributeType, Hash256)],
) -> Hash256 {
    let network_tag = [network.tag()];
    let count = (keys.len() as u32).to_be_bytes();
    let codes: Vec<[u8; 1]> = keys.iter().map(|(attr, _)| [attr.code()]).collect();

    let mut parts: Vec<&[u8]> = vec![
        CERTIFICATE_DOMAIN,
        &network_tag[..],
        &user.as_bytes()[..],
        &count[..],
    ];
    for (code, (_, vk)) in codes.iter().zip(keys) {
        parts.push(&code[..]);
        parts.push(vk.as_bytes());
    }
    zkid_crypto::hash256_multi(&parts)
}
