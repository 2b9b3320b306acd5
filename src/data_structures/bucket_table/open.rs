// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bucket table with open addressing.

use tracing::debug;

use super::config::BucketTableConfig;
use super::probe::ProbeStrategy;
use super::{grown_capacity, slot_index};
use crate::data_structures::entry::Entry;
use crate::data_structures::error::{Result, TableError};
use crate::data_structures::hash::{HashFunction, KeyHasher};

/// State of a single open-addressing slot.
#[derive(Debug)]
enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    /// A removed entry. Lookups probe past it, inserts may reuse it.
    Tombstone,
}

/// Outcome of walking a probe sequence on behalf of an insert.
enum InsertProbe {
    /// The key already occupies this slot.
    Match(usize),
    /// The key is absent and may be placed here.
    Free(usize),
    /// The key is absent and no slot on its sequence is free.
    Exhausted,
}

/// A hash table that resolves collisions by probing alternate slots.
///
/// Each slot holds at most one entry. When a key's whole probe sequence is
/// occupied the table grows to `2 * capacity + 1` slots and the insert is
/// retried, so inserting never fails.
///
/// Lookups walk the same sequence as inserts and only give up on an empty
/// slot or after `capacity` probes. A non-matching occupied slot or a
/// tombstone never ends the search.
#[derive(Debug)]
pub struct OpenTable<V, H = HashFunction> {
    slots: Vec<Slot<V>>,
    hasher: H,
    probe: ProbeStrategy,
    len: usize,
    tombstones: usize,
}

impl<V> OpenTable<V, HashFunction> {
    /// Creates a linear-probing table with the default hash function.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, ProbeStrategy::Linear, HashFunction::default())
    }

    /// Creates a table from a configuration.
    pub fn with_config(config: &BucketTableConfig) -> Result<Self> {
        config.validate()?;
        Self::with_hasher(config.initial_capacity, config.probe, config.hash)
    }
}

impl<V, H: KeyHasher> OpenTable<V, H> {
    /// Creates a table with a custom probe strategy and hash strategy.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, probe: ProbeStrategy, hasher: H) -> Result<Self> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self {
            slots: empty_slots(capacity),
            hasher,
            probe,
            len: 0,
            tombstones: 0,
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

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the probe strategy.
    pub fn probe(&self) -> ProbeStrategy {
        self.probe
    }

    /// Returns the number of tombstones left by removals since the last resize.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Ratio of stored entries to slots. Never exceeds 1.0.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the home slot of `key`.
    pub fn home_slot(&self, key: &str) -> usize {
        slot_index(self.hasher.hash(key), self.capacity())
    }

    /// Returns the slot currently holding `key`.
    pub fn slot_of(&self, key: &str) -> Option<usize> {
        let mut sequence = self.probe.sequence(self.home_slot(key), self.capacity());
        sequence.find_map(|index| match &self.slots[index] {
            Slot::Empty => Some(None),
            Slot::Occupied(entry) if entry.key == key => Some(Some(index)),
            Slot::Occupied(_) | Slot::Tombstone => None,
        })?
    }

    /// Inserts an entry, replacing the value if the key is already present.
    ///
    /// Returns the previous value for the key, if any.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(Entry::new(key, value))
    }

    /// Inserts an already-built entry. See [`insert`](Self::insert).
    pub fn insert_entry(&mut self, entry: Entry<V>) -> Option<V> {
        loop {
            match self.probe_for_insert(&entry.key) {
                InsertProbe::Match(index) => {
                    if let Slot::Occupied(existing) = &mut self.slots[index] {
                        return Some(std::mem::replace(&mut existing.value, entry.value));
                    }
                    return None;
                }
                InsertProbe::Free(index) => {
                    if matches!(self.slots[index], Slot::Tombstone) {
                        self.tombstones -= 1;
                    }
                    self.slots[index] = Slot::Occupied(entry);
                    self.len += 1;
                    return None;
                }
                InsertProbe::Exhausted => {
                    let new_capacity = grown_capacity(self.capacity());
                    debug!(
                        key = %entry.key,
                        old_capacity = self.capacity(),
                        new_capacity,
                        "probe sequence exhausted, growing open table"
                    );
                    self.rehash(new_capacity);
                }
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn find(&self, key: &str) -> Option<&V> {
        self.find_entry(key).map(|entry| &entry.value)
    }

    /// Returns the entry stored under `key`.
    pub fn find_entry(&self, key: &str) -> Option<&Entry<V>> {
        match &self.slots[self.slot_of(key)?] {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Removes `key`, leaving a tombstone so later probes still reach
    /// entries placed past it.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.slot_of(key)?;
        match std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.len -= 1;
                self.tombstones += 1;
                Some(entry.value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Iterates over all entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone => None,
        })
    }

    /// Rebuilds the table with `new_capacity` slots, discarding tombstones.
    ///
    /// Every entry is re-inserted from scratch. If `new_capacity` is too small
    /// for the current entries the re-inserts grow the table further, so the
    /// set of stored keys never changes.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `new_capacity` is zero.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        self.rehash(new_capacity);
        Ok(())
    }

    /// Rebuilds the table with a new capacity and hash strategy.
    pub fn resize_with(&mut self, new_capacity: usize, hasher: H) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        self.hasher = hasher;
        self.rehash(new_capacity);
        Ok(())
    }

    fn probe_for_insert(&self, key: &str) -> InsertProbe {
        let mut first_tombstone = None;
        for index in self.probe.sequence(self.home_slot(key), self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return InsertProbe::Free(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == key => return InsertProbe::Match(index),
                Slot::Occupied(_) => {}
            }
        }
        first_tombstone.map_or(InsertProbe::Exhausted, InsertProbe::Free)
    }

    fn rehash(&mut self, new_capacity: usize) {
        debug!(
            old_capacity = self.capacity(),
            new_capacity,
            entries = self.len,
            "rehashing open table"
        );
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.len = 0;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                // May grow again if the new capacity cannot hold everything
                self.insert_entry(entry);
            }
        }
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}
