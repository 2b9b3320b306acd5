// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bounded cache evicting the least recently used entry.

use hashbrown::HashMap;
use tracing::trace;

use super::error::{MruCacheError, MruCacheResult};
use super::list::{AccessList, NodeId};
use crate::data_structures::entry::Entry;

/// A bounded key/value cache ordered by recency of access.
///
/// The index maps each key to the [`NodeId`] of its node in the access
/// list, so `find` promotes an entry by relinking its existing node.
///
/// Invariant: `index.len() == list.len() <= bound` after every call.
#[derive(Debug)]
pub struct MruCache<V> {
    index: HashMap<String, NodeId>,
    list: AccessList<Entry<V>>,
    bound: usize,
}

impl<V> MruCache<V> {
    /// Creates a cache holding at most `bound` entries.
    ///
    /// # Errors
    ///
    /// Returns [`MruCacheError::ZeroBound`] if `bound` is zero.
    pub fn new(bound: usize) -> MruCacheResult<Self> {
        if bound == 0 {
            return Err(MruCacheError::ZeroBound);
        }
        Ok(Self {
            index: HashMap::with_capacity(bound),
            // One extra node exists between a push and its eviction
            list: AccessList::with_capacity(bound.saturating_add(1)),
            bound,
        })
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up `key` and, on a hit, makes it the most recently used entry.
    ///
    /// A miss has no side effects.
    pub fn find(&mut self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        trace!(key, "promoted cache entry");
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Looks up `key` without changing the access order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Stores a new entry as the most recently used one.
    ///
    /// If the cache exceeds its bound afterwards, exactly one entry, the
    /// least recently used, is evicted and returned.
    ///
    /// # Errors
    ///
    /// Returns [`MruCacheError::DuplicateKey`] if `key` is already cached.
    /// The cache is unchanged in that case.
    pub fn store<K: Into<String>>(&mut self, key: K, value: V) -> MruCacheResult<Option<Entry<V>>> {
        self.store_entry(Entry::new(key, value))
    }

    /// Stores an already-built entry. See [`store`](Self::store).
    pub fn store_entry(&mut self, entry: Entry<V>) -> MruCacheResult<Option<Entry<V>>> {
        if self.index.contains_key(&entry.key) {
            return Err(MruCacheError::DuplicateKey(entry.key));
        }
        let key = entry.key.clone();
        let id = self.list.push_front(entry);
        self.index.insert(key, id);

        if self.list.len() <= self.bound {
            return Ok(None);
        }
        let evicted = self.list.pop_back();
        if let Some(entry) = &evicted {
            self.index.remove(&entry.key);
            trace!(key = %entry.key, bound = self.bound, "evicted least recently used entry");
        }
        Ok(evicted)
    }

    /// Removes `key` from the cache and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|entry| entry.key.as_str())
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.list.iter()
    }

    /// The key that would be evicted next.
    pub fn lru_key(&self) -> Option<&str> {
        self.list.back().map(|entry| entry.key.as_str())
    }

    /// The most recently found or stored key.
    pub fn mru_key(&self) -> Option<&str> {
        self.list.front().map(|entry| entry.key.as_str())
    }
}
