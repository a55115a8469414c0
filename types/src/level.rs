//! Coarse-grained trust tiers.

use crate::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The verification level of an identity. Ordered: `None < Basic < Enhanced < Premium`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum VerificationLevel {
    #[default]
    None = 0,
    Basic = 1,
    Enhanced = 2,
    Premium = 3,
}

impl VerificationLevel {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Basic => "Basic",
            Self::Enhanced => "Enhanced",
            Self::Premium => "Premium",
        }
    }
}

impl TryFrom<u8> for VerificationLevel {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Basic),
            2 => Ok(Self::Enhanced),
            3 => Ok(Self::Premium),
            other => Err(TypeError::UnknownLevel(other)),
        }
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for VerificationLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for VerificationLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(VerificationLevel::None < VerificationLevel::Basic);
        assert!(VerificationLevel::Basic < VerificationLevel::Enhanced);
        assert!(VerificationLevel::Enhanced < VerificationLevel::Premium);
    }

    #[test]
    fn code_round_trip() {
        for code in 0..4u8 {
            assert_eq!(VerificationLevel::try_from(code).unwrap().code(), code);
        }
        assert!(VerificationLevel::try_from(4).is_err());
    }
}
