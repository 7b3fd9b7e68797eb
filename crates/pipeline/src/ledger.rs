//! Per-run de-duplication ledger.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Tracks which article identities (links) have already been queued this run.
///
/// Only the producer inserts at steady state; the controller resets once,
/// synchronously, at the start of every run. Duplicate suppression happens
/// at enqueue time only — a worker may still be processing an older copy of
/// an item already marked seen.
#[derive(Debug, Default)]
pub struct SeenLedger {
    seen: Mutex<HashSet<String>>,
}

impl SeenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, identity: &str) -> bool {
        self.seen.lock().contains(identity)
    }

    pub fn mark_seen(&self, identity: &str) {
        self.seen.lock().insert(identity.to_string());
    }

    /// Marks the identity seen; returns `true` if it was not seen before.
    ///
    /// Single lock acquisition so a check-then-mark pair cannot race.
    pub fn insert_if_unseen(&self, identity: &str) -> bool {
        self.seen.lock().insert(identity.to_string())
    }

    /// Clears all tracked identities. Called exactly once per run start.
    pub fn reset(&self) {
        self.seen.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}
