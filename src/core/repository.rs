//! Thread-safe keyed storage
//!
//! This module provides the `InMemoryRepository` struct, which stores values
//! by key using concurrent data structures to enable safe multi-threaded access.
//!
//! # Design
//!
//! The repository uses `DashMap` (a sharded concurrent HashMap) so that import
//! workers inserting different keys rarely contend, while operations on the same
//! key are serialized by the shard lock. Insert-if-absent goes through the entry
//! API, which makes the uniqueness check and the insertion one atomic step.
//!
//! # Snapshots
//!
//! Readers never get a live view. [`InMemoryRepository::all`] clones every value
//! into a `Vec`, so a caller iterating the result is unaffected by concurrent
//! inserts, removals, or category updates.

use crate::core::traits::Repository;
use crate::types::{Keyed, Transaction};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// The ledger's transaction store
pub type TransactionStore = InMemoryRepository<Transaction>;

/// Concurrent in-memory repository keyed by [`Keyed::key`]
///
/// # Thread Safety
///
/// All methods are safe to call from multiple threads concurrently. The
/// internal `DashMap` ensures that:
/// - Concurrent reads of different keys don't block each other
/// - Concurrent writes to different keys don't block each other
/// - Concurrent inserts of the same key are linearized: exactly one wins
pub struct InMemoryRepository<T: Keyed> {
    /// Values indexed by their key
    items: DashMap<T::Key, T>,
}

impl<T: Keyed> InMemoryRepository<T> {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl<T: Keyed> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    /// Insert a value unless its key is already taken (first occurrence wins)
    fn try_add(&self, value: T) -> bool {
        match self.items.entry(value.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Get a value by key
    ///
    /// The value is cloned to avoid holding the shard lock longer than necessary.
    fn try_get(&self, key: T::Key) -> Option<T> {
        self.items.get(&key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: T::Key) -> bool {
        self.items.remove(&key).is_some()
    }

    fn all(&self) -> Vec<T> {
        self.items
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    /// Update a value with a closure (atomic per key)
    ///
    /// The closure runs while holding the lock of the entry's shard; other
    /// threads touching the same key wait, other shards proceed.
    fn update<F, R>(&self, key: T::Key, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.items
            .get_mut(&key)
            .map(|mut entry| f(entry.value_mut()))
    }

    fn update_each<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut changed = 0;
        for mut entry in self.items.iter_mut() {
            if f(entry.value_mut()) {
                changed += 1;
            }
        }
        changed
    }
}
