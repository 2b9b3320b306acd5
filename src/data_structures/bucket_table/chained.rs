// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bucket table with separate chaining.

use tracing::debug;

use super::config::BucketTableConfig;
use super::slot_index;
use crate::data_structures::entry::Entry;
use crate::data_structures::error::{Result, TableError};
use crate::data_structures::hash::{HashFunction, KeyHasher};

/// A hash table that stores every colliding entry in a per-slot chain.
///
/// Inserting never fails and never evicts: every entry handed to
/// [`insert`](Self::insert) stays retrievable, including repeated keys.
/// The slot count only changes through [`resize`](Self::resize).
///
/// # Type Parameters
///
/// * `V` - The value type.
/// * `H` - The hash strategy. Defaults to [`HashFunction`].
#[derive(Debug)]
pub struct ChainedTable<V, H = HashFunction> {
    buckets: Vec<Vec<Entry<V>>>,
    hasher: H,
    len: usize,
}

impl<V> ChainedTable<V, HashFunction> {
    /// Creates a table with `capacity` buckets and the default hash function.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, HashFunction::default())
    }

    /// Creates a table from a configuration.
    pub fn with_config(config: &BucketTableConfig) -> Result<Self> {
        config.validate()?;
        Self::with_hasher(config.initial_capacity, config.hash)
    }
}

impl<V, H: KeyHasher> ChainedTable<V, H> {
    /// Creates a table with `capacity` buckets and a custom hash strategy.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            hasher,
            len: 0,
        })
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of stored entries to buckets. May exceed 1.0.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the bucket `key` hashes to.
    pub fn bucket_of(&self, key: &str) -> usize {
        slot_index(self.hasher.hash(key), self.capacity())
    }

    /// Returns the chain length of a bucket, or `None` if out of range.
    pub fn bucket_len(&self, bucket: usize) -> Option<usize> {
        self.buckets.get(bucket).map(Vec::len)
    }

    /// Appends an entry to its key's chain.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) {
        self.insert_entry(Entry::new(key, value));
    }

    /// Appends an already-built entry to its key's chain.
    pub fn insert_entry(&mut self, entry: Entry<V>) {
        let bucket = self.bucket_of(&entry.key);
        self.buckets[bucket].push(entry);
        self.len += 1;
    }

    /// Returns the value of the oldest entry stored under `key`.
    pub fn find(&self, key: &str) -> Option<&V> {
        self.find_entry(key).map(|entry| &entry.value)
    }

    /// Returns the oldest entry stored under `key`.
    pub fn find_entry(&self, key: &str) -> Option<&Entry<V>> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|entry| entry.key == key)
    }

    /// Iterates over every value stored under `key`, oldest first.
    pub fn find_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a V> + 'a {
        self.buckets[self.bucket_of(key)]
            .iter()
            .filter(move |entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Removes the oldest entry stored under `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bucket = self.bucket_of(key);
        let chain = &mut self.buckets[bucket];
        let position = chain.iter().position(|entry| entry.key == key)?;
        self.len -= 1;
        Some(chain.remove(position).value)
    }

    /// Iterates over all entries, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.buckets.iter().flatten()
    }

    /// Rebuilds the table with `new_capacity` buckets.
    ///
    /// Every entry's bucket is recomputed. Chain order is preserved, so the
    /// oldest entry for a key is still the one returned by `find`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `new_capacity` is zero. The
    /// table is left untouched in that case.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        debug!(
            old_capacity = self.capacity(),
            new_capacity,
            entries = self.len,
            "resizing chained table"
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let bucket = self.bucket_of(&entry.key);
            self.buckets[bucket].push(entry);
        }
        Ok(())
    }

    /// Rebuilds the table with `new_capacity` buckets and a new hash strategy.
    pub fn resize_with(&mut self, new_capacity: usize, hasher: H) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        self.hasher = hasher;
        self.resize(new_capacity)
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Vec<Entry<V>>> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}
