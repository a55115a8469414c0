//! Ledger parameters shared by every write and read path.

use crate::{NetworkId, VerificationLevel};
use serde::{Deserialize, Serialize};

/// Parameters a ledger instance is started with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Deployment this ledger belongs to.
    pub network: NetworkId,

    /// Level assigned to a freshly registered identity.
    pub registration_level: VerificationLevel,

    /// How far in the future a certificate timestamp may lie before
    /// verification rejects it.
    pub clock_skew_secs: u64,

    /// Maximum distance between a signed call's timestamp and ledger time.
    pub call_time_tolerance_secs: u64,

    /// Optional maximum certificate age. `None` means certificates never
    /// age out; they only become invalid when the underlying state changes.
    pub certificate_max_age_secs: Option<u64>,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            network: NetworkId::Dev,
            registration_level: VerificationLevel::Basic,
            clock_skew_secs: 300,
            call_time_tolerance_secs: 600,
            certificate_max_age_secs: None,
        }
    }
}

impl LedgerParams {
    /// Defaults for a given network.
    pub fn for_network(network: NetworkId) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }
}
