//! Recently submitted call outcomes, keyed by call hash.
//!
//! A bounded FIFO map: when full, the oldest outcome is evicted to make room
//! for a new one. Clients poll it through the `receipt` action.

use std::collections::{HashMap, VecDeque};
use zkid_transactions::CallOutcome;
use zkid_types::Hash256;

pub struct OutcomeCache {
    outcomes: HashMap<Hash256, CallOutcome>,
    order: VecDeque<Hash256>,
    capacity: usize,
}

impl OutcomeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            outcomes: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an outcome. A hash already present keeps its first outcome.
    pub fn insert(&mut self, tx_hash: Hash256, outcome: CallOutcome) {
        if self.capacity == 0 || self.outcomes.contains_key(&tx_hash) {
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.outcomes.remove(&evicted);
            }
        }
        self.outcomes.insert(tx_hash, outcome);
        self.order.push_back(tx_hash);
    }

    pub fn get(&self, tx_hash: &Hash256) -> Option<&CallOutcome> {
        self.outcomes.get(tx_hash)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(b: u8) -> Hash256 {
        Hash256::new([b; 32])
    }

    fn failed(code: &str) -> CallOutcome {
        CallOutcome::Failed {
            code: code.into(),
            message: String::new(),
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut cache = OutcomeCache::new(2);
        cache.insert(hash(1), failed("a"));
        cache.insert(hash(2), failed("b"));
        cache.insert(hash(3), failed("c"));

        assert!(cache.get(&hash(1)).is_none());
        assert!(cache.get(&hash(2)).is_some());
        assert!(cache.get(&hash(3)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn first_outcome_wins() {
        let mut cache = OutcomeCache::new(4);
        cache.insert(hash(1), failed("first"));
        cache.insert(hash(1), failed("second"));
        assert_eq!(cache.get(&hash(1)), Some(&failed("first")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = OutcomeCache::new(0);
        cache.insert(hash(1), failed("a"));
        assert!(cache.is_empty());
    }
}
