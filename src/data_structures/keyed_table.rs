// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Common call surface over the chained, open-addressing and cuckoo tables.

use crate::data_structures::bucket_table::{ChainedTable, OpenTable};
use crate::data_structures::cuckoo_table::CuckooTable;
use crate::data_structures::error::Result;
use crate::data_structures::hash::KeyHasher;

/// A string-keyed table that can be resized.
///
/// The semantics of a repeated key follow the implementing table: chaining
/// retains every entry while open addressing and cuckoo replace the value.
pub trait KeyedTable<V> {
    /// Inserts `value` under `key`.
    fn insert(&mut self, key: &str, value: V) -> Result<()>;

    /// Returns the value stored under `key`.
    fn find(&self, key: &str) -> Option<&V>;

    /// Rebuilds the table with `new_capacity` slots.
    fn resize(&mut self, new_capacity: usize) -> Result<()>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Number of slots. For the cuckoo table, slots per subtable.
    fn capacity(&self) -> usize;

    /// Whether the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ratio of stored entries to slots.
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}

impl<V, H: KeyHasher> KeyedTable<V> for ChainedTable<V, H> {
    fn insert(&mut self, key: &str, value: V) -> Result<()> {
        ChainedTable::insert(self, key, value);
        Ok(())
    }

    fn find(&self, key: &str) -> Option<&V> {
        ChainedTable::find(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        ChainedTable::resize(self, new_capacity)
    }

    fn len(&self) -> usize {
        ChainedTable::len(self)
    }

    fn capacity(&self) -> usize {
        ChainedTable::capacity(self)
    }
}

impl<V, H: KeyHasher> KeyedTable<V> for OpenTable<V, H> {
    fn insert(&mut self, key: &str, value: V) -> Result<()> {
        OpenTable::insert(self, key, value);
        Ok(())
    }

    fn find(&self, key: &str) -> Option<&V> {
        OpenTable::find(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        OpenTable::resize(self, new_capacity)
    }

    fn len(&self) -> usize {
        OpenTable::len(self)
    }

    fn capacity(&self) -> usize {
        OpenTable::capacity(self)
    }
}

impl<V, H: KeyHasher> KeyedTable<V> for CuckooTable<V, H> {
    fn insert(&mut self, key: &str, value: V) -> Result<()> {
        CuckooTable::insert(self, key, value).map(|_| ())
    }

    fn find(&self, key: &str) -> Option<&V> {
        CuckooTable::find(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        CuckooTable::resize(self, new_capacity)
    }

    fn len(&self) -> usize {
        CuckooTable::len(self)
    }

    fn capacity(&self) -> usize {
        CuckooTable::capacity(self)
    }

    fn load_factor(&self) -> f64 {
        CuckooTable::load_factor(self)
    }
}
