//! Provable identity attributes.

use crate::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A fact about the identity holder that is proven independently of others.
///
/// The numeric codes 0–6 are part of the wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AttributeType {
    AgeOver18 = 0,
    AgeOver21 = 1,
    Nationality = 2,
    EducationLevel = 3,
    EmploymentStatus = 4,
    CreditScoreRange = 5,
    Custom = 6,
}

impl AttributeType {
    /// Every attribute, in code order.
    pub const ALL: [AttributeType; 7] = [
        Self::AgeOver18,
        Self::AgeOver21,
        Self::Nationality,
        Self::EducationLevel,
        Self::EmploymentStatus,
        Self::CreditScoreRange,
        Self::Custom,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AgeOver18 => "Age Over 18",
            Self::AgeOver21 => "Age Over 21",
            Self::Nationality => "Nationality",
            Self::EducationLevel => "Education Level",
            Self::EmploymentStatus => "Employment Status",
            Self::CreditScoreRange => "Credit Score Range",
            Self::Custom => "Custom Attribute",
        }
    }
}

impl TryFrom<u8> for AttributeType {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(TypeError::UnknownAttribute(code))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_position() {
        for (i, attr) in AttributeType::ALL.iter().enumerate() {
            assert_eq!(attr.code() as usize, i);
            assert_eq!(AttributeType::try_from(i as u8).unwrap(), *attr);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(
            AttributeType::try_from(7).unwrap_err(),
            TypeError::UnknownAttribute(7)
        );
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&AttributeType::CreditScoreRange).unwrap();
        assert_eq!(json, "5");
        assert!(serde_json::from_str::<AttributeType>("9").is_err());
    }
}
