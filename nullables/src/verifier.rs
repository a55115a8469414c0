//! Nullable proof verifier with scriptable answers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use zkid_types::{FieldElement, Proof};
use zkid_verification::{KeyRef, ProofVerifier};

/// A proof verifier whose answer is set by the test.
///
/// Clones share state, so a test can flip the answer after handing one to
/// the ledger and count how often it was consulted.
#[derive(Clone, Debug)]
pub struct NullVerifier {
    accept: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl NullVerifier {
    /// A verifier that accepts everything.
    pub fn accepting() -> Self {
        Self {
            accept: Arc::new(AtomicBool::new(true)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A verifier that rejects everything.
    pub fn rejecting() -> Self {
        let v = Self::accepting();
        v.set_accept(false);
        v
    }

    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullVerifier {
    fn default() -> Self {
        Self::accepting()
    }
}

impl ProofVerifier for NullVerifier {
    fn name(&self) -> &str {
        "null"
    }

    fn verify(&self, _proof: &Proof, _public_inputs: &[FieldElement], _key: &KeyRef) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.accept.load(Ordering::SeqCst)
    }
}
