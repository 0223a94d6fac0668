//! Per-collection writer locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lazily grows one lock per collection name.
///
/// Owned by a single [`Driver`](crate::Driver), so independently opened stores
/// never share locks. Entries are never evicted: a deleted collection keeps
/// its lock and a later write to the same name reuses it.
#[derive(Debug, Default)]
pub struct MutexRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MutexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it on first use.
    ///
    /// The registry lock is held only for the lookup-or-insert.
    pub fn lock_for(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = recover(self.locks.lock());
        locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of collections that have been given a lock.
    pub fn len(&self) -> usize {
        recover(self.locks.lock()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Blocks until the collection lock is held.
///
/// The guarded value is `()` and writes never leave partial state behind, so a
/// lock poisoned by a panicking writer is still safe to take.
pub(crate) fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    recover(lock.lock())
}

fn recover<G>(result: Result<G, PoisonError<G>>) -> G {
    result.unwrap_or_else(PoisonError::into_inner)
}
