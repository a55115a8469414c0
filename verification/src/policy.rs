//! Verification level escalation policies.

use serde::{Deserialize, Serialize};
use zkid_types::{AttributeType, VerificationLevel};

/// Decides the level an identity should hold after an attribute is verified.
///
/// Returning a level at or below `current` leaves the identity unchanged; the
/// ledger never lowers a level.
pub trait LevelPolicy: Send + Sync {
    fn name(&self) -> &str;

    /// `verified` is the full set of verified attributes including the one
    /// just recorded.
    fn level_after(
        &self,
        current: VerificationLevel,
        verified: &[AttributeType],
    ) -> VerificationLevel;
}

impl<P: LevelPolicy + ?Sized> LevelPolicy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn level_after(
        &self,
        current: VerificationLevel,
        verified: &[AttributeType],
    ) -> VerificationLevel {
        (**self).level_after(current, verified)
    }
}

/// Levels only change through explicit admin updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualLevelPolicy;

impl LevelPolicy for ManualLevelPolicy {
    fn name(&self) -> &str {
        "manual"
    }

    fn level_after(
        &self,
        current: VerificationLevel,
        _verified: &[AttributeType],
    ) -> VerificationLevel {
        current
    }
}

/// Escalates by number of verified attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCountPolicy {
    /// Verified attribute count that grants ENHANCED.
    pub enhanced_at: usize,
    /// Verified attribute count that grants PREMIUM.
    pub premium_at: usize,
}

impl Default for AttributeCountPolicy {
    fn default() -> Self {
        Self {
            enhanced_at: 2,
            premium_at: 4,
        }
    }
}

impl LevelPolicy for AttributeCountPolicy {
    fn name(&self) -> &str {
        "attribute-count"
    }

    fn level_after(
        &self,
        current: VerificationLevel,
        verified: &[AttributeType],
    ) -> VerificationLevel {
        let count = verified.len();
        let earned = if count >= self.premium_at {
            VerificationLevel::Premium
        } else if count >= self.enhanced_at {
            VerificationLevel::Enhanced
        } else {
            VerificationLevel::None
        };
        current.max(earned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttributeType::*;

    #[test]
    fn manual_never_escalates() {
        let p = ManualLevelPolicy;
        assert_eq!(
            p.level_after(VerificationLevel::Basic, &AttributeType::ALL),
            VerificationLevel::Basic
        );
    }

    #[test]
    fn count_policy_thresholds() {
        let p = AttributeCountPolicy::default();
        let basic = VerificationLevel::Basic;
        assert_eq!(p.level_after(basic, &[AgeOver18]), basic);
        assert_eq!(
            p.level_after(basic, &[AgeOver18, Nationality]),
            VerificationLevel::Enhanced
        );
        assert_eq!(
            p.level_after(basic, &[AgeOver18, AgeOver21, Nationality, Custom]),
            VerificationLevel::Premium
        );
    }

    #[test]
    fn count_policy_never_lowers() {
        let p = AttributeCountPolicy::default();
        assert_eq!(
            p.level_after(VerificationLevel::Premium, &[AgeOver18]),
            VerificationLevel::Premium
        );
    }
}
