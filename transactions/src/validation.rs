//! Stateless call validation.

use crate::{SignedCall, TransactionError};
use zkid_types::{NetworkId, Timestamp};

/// Validate a signed call's envelope: timestamp within tolerance of `now`,
/// then signature.
///
/// Stateful checks (nonce, ownership, identity state) are done by the ledger.
pub fn validate_signed_call(
    call: &SignedCall,
    network: NetworkId,
    now: Timestamp,
    time_tolerance_secs: u64,
) -> Result<(), TransactionError> {
    let time_diff = call.timestamp.distance(now);
    if time_diff > time_tolerance_secs {
        return Err(TransactionError::InvalidTimestamp {
            reason: format!(
                "timestamp {} is {} seconds away from now {}, tolerance is {}",
                call.timestamp, time_diff, now, time_tolerance_secs
            ),
        });
    }
    call.verify_signature(network)
}
