//! The per-account identity record.

use crate::{Hash256, Timestamp, VerificationLevel};
use serde::{Deserialize, Serialize};

/// What the ledger knows about one account.
///
/// An absent account reads as [`IdentityRecord::default()`]: zero
/// commitment, level `None`, epoch timestamp, inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Opaque commitment to the holder's private data. Immutable.
    pub identity_commitment: Hash256,
    /// Current trust tier. Never decreases.
    pub level: VerificationLevel,
    /// Registration time. Immutable.
    pub timestamp: Timestamp,
    /// True once registered; there is no way back.
    pub is_active: bool,
}

impl IdentityRecord {
    /// A freshly registered identity.
    pub fn registered(
        identity_commitment: Hash256,
        level: VerificationLevel,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            identity_commitment,
            level,
            timestamp,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_inactive_zero_record() {
        let r = IdentityRecord::default();
        assert!(r.identity_commitment.is_zero());
        assert_eq!(r.level, VerificationLevel::None);
        assert!(!r.is_active);
    }

    #[test]
    fn registered_is_active() {
        let r = IdentityRecord::registered(
            Hash256::new([1; 32]),
            VerificationLevel::Basic,
            Timestamp::new(10),
        );
        assert!(r.is_active);
        assert_eq!(r.timestamp, Timestamp::new(10));
    }
}
