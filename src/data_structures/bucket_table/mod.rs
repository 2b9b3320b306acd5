// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-size bucket tables with pluggable collision resolution.
//!
//! Two slot-resolution policies are provided:
//!
//! - [`ChainedTable`]: separate chaining. Every slot owns a chain of entries.
//!   Inserts are O(1) and never lose an entry.
//! - [`OpenTable`]: open addressing. Every slot owns at most one entry and
//!   collisions walk a [`ProbeStrategy`] (linear or quadratic). A full probe
//!   sequence grows the table to `2 * capacity + 1` slots.
//!
//! Both tables take their hash function as a [`KeyHasher`] strategy and can
//! be resized, which recomputes every entry's slot for the new modulus.
//!
//! # Example
//!
//! ```
//! use bucket_cache_lib::data_structures::bucket_table::{OpenTable, ProbeStrategy};
//! use bucket_cache_lib::data_structures::hash::HashFunction;
//!
//! let mut table = OpenTable::with_hasher(4, ProbeStrategy::Quadratic, HashFunction::Windowed)?;
//! table.insert("hello", 1);
//! table.insert("world", 2);
//!
//! assert_eq!(table.find("hello"), Some(&1));
//! assert_eq!(table.find("missing"), None);
//!
//! table.resize(9)?;
//! assert_eq!(table.find("world"), Some(&2));
//! # Ok::<(), bucket_cache_lib::data_structures::TableError>(())
//! ```
//!
//! [`KeyHasher`]: crate::data_structures::hash::KeyHasher

mod chained;
mod config;
mod open;
mod probe;

pub use chained::ChainedTable;
pub use config::BucketTableConfig;
pub use open::OpenTable;
pub use probe::{ProbeSequence, ProbeStrategy};

/// Maps a hash value onto a slot of a table with `capacity` slots.
///
/// Callers guarantee `capacity > 0`; every table rejects zero capacities at
/// construction and resize.
#[inline]
pub(crate) fn slot_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Capacity a table grows to when it runs out of room.
#[inline]
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    capacity.saturating_mul(2).saturating_add(1)
}
