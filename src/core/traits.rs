//! Core traits for keyed storage
//!
//! The import pipeline and the command loop only rely on this interface, so
//! any store honoring the per-key uniqueness contract can be plugged in.

use crate::types::Keyed;

/// Trait for a concurrency-safe keyed collection
///
/// All methods take `&self`; implementations synchronize internally so a
/// single instance can be shared across import workers and readers.
pub trait Repository<T: Keyed>: Send + Sync {
    /// Insert `value` only if no entry with the same key exists
    ///
    /// Returns whether the insertion happened. Concurrent calls with the same
    /// key produce exactly one `true`.
    fn try_add(&self, value: T) -> bool;

    /// Current value for `key`, if any
    fn try_get(&self, key: T::Key) -> Option<T>;

    /// Remove the entry for `key`; returns whether one was removed
    fn remove(&self, key: T::Key) -> bool;

    /// Snapshot of all values, independent of later mutations
    fn all(&self) -> Vec<T>;

    /// Number of entries at the time of the call
    fn count(&self) -> usize;

    /// Update an entry in place while holding its lock
    ///
    /// Returns the closure's result, or `None` when the key is absent.
    fn update<F, R>(&self, key: T::Key, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R;

    /// Apply `f` to every entry; returns how many calls reported a change
    fn update_each<F>(&self, f: F) -> usize
    where
        F: FnMut(&mut T) -> bool;
}
