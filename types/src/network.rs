//! Network identifier.

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies which ledger deployment a node serves.
///
/// The network is mixed into certificate hashes and call signatures, so a
/// certificate or signed call from one network never validates on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production deployment.
    Live,
    /// The public test deployment.
    Test,
    /// Local development.
    Dev,
}

impl NetworkId {
    /// Default RPC port for this network.
    pub fn default_rpc_port(&self) -> u16 {
        match self {
            Self::Live => 7077,
            Self::Test => 17077,
            Self::Dev => 27077,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Single-byte tag used for domain separation in hashes.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Live => 0x01,
            Self::Test => 0x02,
            Self::Dev => 0x03,
        }
    }
}

impl FromStr for NetworkId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "test" => Ok(Self::Test),
            "dev" => Ok(Self::Dev),
            other => Err(TypeError::UnknownNetwork(other.to_string())),
        }
    }
}
