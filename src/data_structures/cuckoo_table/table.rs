// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Implementation of the two-table cuckoo hash.

use hashbrown::HashSet;
use tracing::debug;

use super::config::{CuckooTableConfig, DEFAULT_MAX_GROWTHS};
use crate::data_structures::bucket_table::{grown_capacity, slot_index};
use crate::data_structures::entry::Entry;
use crate::data_structures::error::{Result, TableError};
use crate::data_structures::hash::{HashFunction, KeyHasher};

/// Two parallel slot arrays, indexed by subtable number.
type Subtables<T> = [Vec<Option<T>>; 2];

/// A cuckoo hash table with two subtables and two hash functions.
///
/// Every present key sits either in subtable 0 at `h0(key) % capacity` or in
/// subtable 1 at `h1(key) % capacity`. A lookup therefore inspects at most
/// two slots.
///
/// # Type Parameters
///
/// * `V` - The value type.
/// * `H` - The hash strategy. Defaults to [`HashFunction`].
#[derive(Debug)]
pub struct CuckooTable<V, H = HashFunction> {
    tables: Subtables<Entry<V>>,
    hashers: [H; 2],
    capacity: usize,
    len: usize,
    max_growths: usize,
}

impl<V> CuckooTable<V, HashFunction> {
    /// Creates a table with `capacity` slots per subtable, hashing with
    /// [`HashFunction::Windowed`] and [`HashFunction::Fnv`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&CuckooTableConfig::new().with_initial_capacity(capacity))
    }

    /// Creates a table from a configuration.
    pub fn with_config(config: &CuckooTableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_hashers(config.initial_capacity, config.hash_functions)?
            .with_max_growths(config.max_growths))
    }
}

impl<V, H: KeyHasher> CuckooTable<V, H> {
    /// Creates a table with custom hash strategies for the two subtables.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_hashers(capacity: usize, hashers: [H; 2]) -> Result<Self> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self {
            tables: empty_subtables(capacity),
            hashers,
            capacity,
            len: 0,
            max_growths: DEFAULT_MAX_GROWTHS,
        })
    }

    /// Sets the maximum number of growths a single insert or resize may
    /// perform. Values below 1 are raised to 1.
    pub fn with_max_growths(mut self, max_growths: usize) -> Self {
        self.max_growths = max_growths.max(1);
        self
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in each subtable.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ratio of stored entries to the slots of both subtables.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / (2 * self.capacity) as f64
    }

    /// Returns the home slot of `key` in subtable `table` (0 or 1).
    pub fn home_slot(&self, table: usize, key: &str) -> usize {
        slot_index(self.hashers[table].hash(key), self.capacity)
    }

    /// Returns `(subtable, slot)` of `key`, inspecting at most two slots.
    ///
    /// An empty home slot in subtable 0 proves the key is absent: entries
    /// only move to subtable 1 after being displaced from an occupied slot
    /// of subtable 0.
    pub fn locate(&self, key: &str) -> Option<(usize, usize)> {
        for table in 0..2 {
            let slot = self.home_slot(table, key);
            match &self.tables[table][slot] {
                None => return None,
                Some(entry) if entry.key == key => return Some((table, slot)),
                Some(_) => {}
            }
        }
        None
    }

    /// Returns the value stored under `key`.
    pub fn find(&self, key: &str) -> Option<&V> {
        self.find_entry(key).map(|entry| &entry.value)
    }

    /// Returns the entry stored under `key`.
    pub fn find_entry(&self, key: &str) -> Option<&Entry<V>> {
        let (table, slot) = self.locate(key)?;
        self.tables[table][slot].as_ref()
    }

    /// Inserts an entry, replacing the value if the key is already present.
    ///
    /// A new key is placed by displacement: it takes its home slot in
    /// subtable 0, and whichever entry held that slot moves to its home slot
    /// in the other subtable, and so on. Revisiting a `(subtable, slot)` pair
    /// means displacement alone cannot finish, so both subtables grow to
    /// `2 * capacity + 1` slots and the new entry is placed again.
    ///
    /// Returns the previous value for the key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RehashingFailed`] naming the new key if no
    /// layout is found within the growth bound. The table is left exactly as
    /// it was before the call. Use [`try_insert_entry`](Self::try_insert_entry)
    /// to get the rejected entry back.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.insert_entry(Entry::new(key, value))
    }

    /// Inserts an already-built entry. See [`insert`](Self::insert).
    pub fn insert_entry(&mut self, entry: Entry<V>) -> Result<Option<V>> {
        self.try_insert_entry(entry).map_err(|rejected| rejected.error)
    }

    /// Inserts an entry, handing it back inside the error if no layout can
    /// hold it. Stored entries are never moved by a failed insert.
    pub fn try_insert_entry(
        &mut self,
        entry: Entry<V>,
    ) -> std::result::Result<Option<V>, InsertError<V>> {
        if let Some((table, slot)) = self.locate(&entry.key) {
            if let Some(existing) = self.tables[table][slot].as_mut() {
                return Ok(Some(std::mem::replace(&mut existing.value, entry.value)));
            }
        }

        let capacity = self.capacity;
        let hashers = &self.hashers;
        let first_slot = slot_index(hashers[0].hash(&entry.key), capacity);
        let path = displacement_path(&self.tables, first_slot, |table, occupant| {
            slot_index(hashers[table].hash(&occupant.key), capacity)
        });

        match path {
            Some(path) => {
                shift_along(&mut self.tables, &path, entry);
                self.len += 1;
            }
            None => {
                debug!(
                    key = %entry.key,
                    capacity,
                    entries = self.len,
                    "cuckoo displacement cycled, growing table"
                );
                // A successful rebuild recounts every entry, including this one.
                // A failed one hands the pending entry back.
                let rebuilt = self.rebuild(grown_capacity(capacity), Some(entry));
                if let Err((error, Some(entry))) = rebuilt {
                    return Err(InsertError { error, entry });
                }
            }
        }
        Ok(None)
    }

    /// Iterates over all entries, subtable 0 first.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.tables.iter().flatten().flatten()
    }

    /// Rebuilds both subtables with `new_capacity` slots each.
    ///
    /// If the entries cannot be laid out at `new_capacity` the capacity keeps
    /// growing by `2 * capacity + 1` until they can.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `new_capacity` is zero and
    /// [`TableError::RehashingFailed`] if no layout is found within the
    /// growth bound. The table is unchanged in both cases.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        self.rebuild(new_capacity, None).map_err(|(error, _)| error)
    }

    /// Moves every entry (plus `pending`) into fresh subtables of at least
    /// `first_capacity` slots.
    ///
    /// Layouts are planned on entry indices first, so a failed attempt never
    /// moves an entry. Attempts stop after `max_growths` or once the capacity
    /// passes [`growth_ceiling`], whichever comes first. On failure the
    /// current layout is restored and `pending` is handed back.
    fn rebuild(
        &mut self,
        first_capacity: usize,
        pending: Option<Entry<V>>,
    ) -> std::result::Result<(), (TableError, Option<Entry<V>>)> {
        let mut positions = Vec::with_capacity(self.len);
        let mut entries = Vec::with_capacity(self.len + 1);
        for (table, slots) in self.tables.iter_mut().enumerate() {
            for (slot, cell) in slots.iter_mut().enumerate() {
                if let Some(entry) = cell.take() {
                    positions.push((table, slot));
                    entries.push(entry);
                }
            }
        }
        let pending_key = pending.as_ref().map(|entry| entry.key.clone());
        entries.extend(pending);

        let ceiling = first_capacity.max(growth_ceiling(entries.len()));
        let mut capacity = first_capacity;
        let mut attempts = 0;
        while attempts < self.max_growths && capacity <= ceiling {
            attempts += 1;
            if let Some(plan) = self.plan(capacity, &entries) {
                debug!(
                    old_capacity = self.capacity,
                    new_capacity = capacity,
                    entries = entries.len(),
                    attempt = attempts,
                    "rehashed cuckoo table"
                );
                self.install(capacity, plan, entries);
                return Ok(());
            }
            debug!(capacity, attempt = attempts, "cuckoo rehash cycled, growing again");
            capacity = grown_capacity(capacity);
        }

        let pending = if entries.len() > positions.len() {
            entries.pop()
        } else {
            None
        };
        for ((table, slot), entry) in positions.into_iter().zip(entries) {
            self.tables[table][slot] = Some(entry);
        }
        let error = TableError::RehashingFailed {
            key: pending_key.unwrap_or_default(),
            growths: attempts,
        };
        Err((error, pending))
    }

    /// Plans a layout of `entries` at `capacity`, by index.
    fn plan(&self, capacity: usize, entries: &[Entry<V>]) -> Option<Subtables<usize>> {
        let home_slot = |table: usize, index: &usize| {
            slot_index(self.hashers[table].hash(&entries[*index].key), capacity)
        };
        let mut plan = empty_subtables(capacity);
        for index in 0..entries.len() {
            let path = displacement_path(&plan, home_slot(0, &index), home_slot)?;
            shift_along(&mut plan, &path, index);
        }
        Some(plan)
    }

    fn install(&mut self, capacity: usize, plan: Subtables<usize>, entries: Vec<Entry<V>>) {
        let mut entries: Vec<Option<Entry<V>>> = entries.into_iter().map(Some).collect();
        self.len = entries.len();
        self.capacity = capacity;
        self.tables = plan.map(|slots| {
            slots
                .into_iter()
                .map(|cell| cell.and_then(|index| entries[index].take()))
                .collect()
        });
    }
}

/// A rejected cuckoo insert: the error plus the entry that found no slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertError<V> {
    /// Why the entry was rejected
    pub error: TableError,
    /// The entry that was being inserted, unchanged
    pub entry: Entry<V>,
}

/// Largest per-subtable capacity a rebuild of `entries` items may try.
///
/// Stops hash pairs that can never separate a group of keys from growing
/// the table without limit.
fn growth_ceiling(entries: usize) -> usize {
    entries.saturating_mul(8).saturating_add(64)
}

/// Walks the displacement chain of an item whose home slot in subtable 0 is
/// `first_slot`, without moving anything.
///
/// Returns the visited `(subtable, slot)` pairs ending at an empty slot, or
/// `None` when a pair repeats. No pair repeats before the end, so every slot
/// is read in its current state.
fn displacement_path<T>(
    tables: &Subtables<T>,
    first_slot: usize,
    home_slot: impl Fn(usize, &T) -> usize,
) -> Option<Vec<(usize, usize)>> {
    let mut visited: [HashSet<usize>; 2] = Default::default();
    let mut path = Vec::new();
    let (mut table, mut slot) = (0, first_slot);
    loop {
        if !visited[table].insert(slot) {
            return None;
        }
        path.push((table, slot));
        match &tables[table][slot] {
            None => return Some(path),
            Some(occupant) => {
                table ^= 1;
                slot = home_slot(table, occupant);
            }
        }
    }
}

/// Places `item` at the head of `path`, moving each occupant one step along.
fn shift_along<T>(tables: &mut Subtables<T>, path: &[(usize, usize)], item: T) {
    let mut pending = item;
    for &(table, slot) in path {
        match tables[table][slot].replace(pending) {
            Some(occupant) => pending = occupant,
            None => return,
        }
    }
}

fn empty_subtables<T>(capacity: usize) -> Subtables<T> {
    [
        std::iter::repeat_with(|| None).take(capacity).collect(),
        std::iter::repeat_with(|| None).take(capacity).collect(),
    ]
}
