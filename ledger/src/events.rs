//! Event fan-out for ledger subscribers.

use zkid_transactions::LedgerEvent;

type Listener = Box<dyn Fn(&LedgerEvent) + Send + Sync>;

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the writing thread after the batch has
/// committed and the write lock is released; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
