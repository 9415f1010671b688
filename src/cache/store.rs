//! Cache Store Module
//!
//! Concurrent key to entry storage. Lookups return entries exactly as they were
//! written; hiding expired entries is left to the cache facade.

use std::ops::ControlFlow;

use dashmap::DashMap;
use tokio::time::Instant;

use crate::cache::Entry;

// == Store ==
/// Thread-safe mapping from keys to entries.
///
/// Backed by a sharded `DashMap`, so callers never need an external lock.
/// Operations on keys in different shards proceed in parallel.
#[derive(Debug)]
pub struct Store<V> {
    entries: DashMap<String, Entry<V>>,
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V: Clone> Store<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Load ==
    /// Returns a copy of the entry stored for `key`, expired or not.
    pub fn load(&self, key: &str) -> Option<Entry<V>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    // == Store ==
    /// Inserts `entry` under `key`, replacing whatever was there.
    pub fn store(&self, key: String, entry: Entry<V>) {
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes the entry for `key`. Missing keys are ignored.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    // == Delete If Expired ==
    /// Removes the entry for `key` only if it is expired at `now`.
    ///
    /// Returns `true` when an entry was removed. An entry that was replaced by a
    /// live one since `now` was sampled is left alone.
    pub fn delete_if_expired(&self, key: &str, now: Instant) -> bool {
        self.entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
    }

    // == Range ==
    /// Calls `visitor` once per stored pair, in no particular order.
    ///
    /// Returning `ControlFlow::Break(())` stops the traversal. The visitor
    /// runs while a shard read lock is held and must not write to the store.
    pub fn range<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &Entry<V>) -> ControlFlow<()>,
    {
        for pair in self.entries.iter() {
            if visitor(pair.key(), pair.value()).is_break() {
                break;
            }
        }
    }

    // == Length ==
    /// Number of physically stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
