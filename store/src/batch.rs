//! Atomic write batches.

use zkid_types::{AccountAddress, AttributeType, Hash256, IdentityRecord};

/// One mutation inside a [`WriteBatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    PutIdentity {
        account: AccountAddress,
        record: IdentityRecord,
    },
    /// Insert-if-absent. Fails the batch if the nullifier exists.
    InsertNullifier(Hash256),
    SetAttributeVerified {
        account: AccountAddress,
        attribute: AttributeType,
    },
    PutVerificationKey {
        attribute: AttributeType,
        vk_hash: Hash256,
    },
    SetOwner(Option<AccountAddress>),
    /// One-way flag set together with the first owner.
    MarkInitialized,
    SetVerifierAuthorization {
        verifier: AccountAddress,
        authorized: bool,
    },
    SetNonce {
        account: AccountAddress,
        nonce: u64,
    },
}

/// An ordered list of ops committed all-or-nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<StoreOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: StoreOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl IntoIterator for WriteBatch {
    type Item = StoreOp;
    type IntoIter = std::vec::IntoIter<StoreOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl FromIterator<StoreOp> for WriteBatch {
    fn from_iter<I: IntoIterator<Item = StoreOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_keeps_op_order() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());
        batch.push(StoreOp::InsertNullifier(Hash256::new([1; 32])));
        batch.push(StoreOp::SetOwner(None));
        assert_eq!(batch.len(), 2);
        assert!(matches!(batch.ops()[0], StoreOp::InsertNullifier(_)));
        let ops: Vec<_> = batch.into_iter().collect();
        assert_eq!(ops[1], StoreOp::SetOwner(None));
    }
}
