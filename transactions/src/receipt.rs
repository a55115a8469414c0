//! Results of executed calls.

use crate::LedgerEvent;
use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, Hash256, Timestamp};

/// Proof that a write committed, with the events it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the signed call, when the write arrived as one.
    pub tx_hash: Option<Hash256>,
    pub caller: AccountAddress,
    /// Ledger time at commit.
    pub timestamp: Timestamp,
    pub events: Vec<LedgerEvent>,
}

/// What happened to a submitted call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallOutcome {
    Confirmed { receipt: Receipt },
    /// The ledger rejected the call; nothing was written.
    Failed { code: String, message: String },
}

impl CallOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_json_shape() {
        let failed = CallOutcome::Failed {
            code: "nullifier_reused".into(),
            message: "nullifier already used".into(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], "nullifier_reused");
        assert!(!failed.is_confirmed());
    }
}
