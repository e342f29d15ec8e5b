//! Deferred XP grants.
//!
//! Achievement and level-up bonuses are granted a short delay after the
//! event that earned them. The queue is drained by the engine's tick; nothing
//! runs on its own thread. Dropping the scheduler discards whatever is still
//! pending.

use std::collections::BTreeMap;

/// An XP grant waiting for its due time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredGrant {
    pub amount: u64,
    pub reason: String,
}

/// Grants ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(i64, u64), DeferredGrant>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at: i64, grant: DeferredGrant) {
        self.queue.insert((due_at, self.next_seq), grant);
        self.next_seq += 1;
    }

    /// Remove and return the earliest grant due at or before `now`.
    pub fn pop_due(&mut self, now: i64) -> Option<DeferredGrant> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > now {
            return None;
        }
        self.queue.remove(&key)
    }

    /// Remove and return the earliest grant regardless of due time.
    pub fn pop_next(&mut self) -> Option<DeferredGrant> {
        self.queue.pop_first().map(|(_, grant)| grant)
    }

    pub fn pending(&self) -> impl Iterator<Item = &DeferredGrant> {
        self.queue.values()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
