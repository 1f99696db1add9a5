use std::collections::HashMap;
use std::sync::Arc;

use super::{InMemoryLock, Lock};

/// Map from item id to that item's lock.
///
/// The table holds no synchronisation of its own. Entries are shared out as
/// `Arc`s, so a caller can block on an item's lock after the table has been
/// released, and an entry removed mid-wait stays valid for that waiter.
pub struct LockTable<L: Lock = InMemoryLock> {
    locks: HashMap<u64, Arc<L>>,
}

impl<L: Lock + Default> LockTable<L> {
    pub fn new() -> Self {
        LockTable {
            locks: HashMap::new(),
        }
    }

    /// Register a fresh lock for `id`. An existing entry is left in place.
    pub fn insert(&mut self, id: u64) -> Arc<L> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(L::default()))
            .clone()
    }
}

impl<L: Lock + Default> Default for LockTable<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lock> LockTable<L> {
    pub fn get(&self, id: u64) -> Option<Arc<L>> {
        self.locks.get(&id).cloned()
    }

    /// Drop the entry for `id`, handing back its lock if there was one.
    pub fn remove(&mut self, id: u64) -> Option<Arc<L>> {
        self.locks.remove(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.locks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
