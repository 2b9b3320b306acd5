//! Data structures for keyed storage and caching.
//!
//! This module contains the hash tables, the bounded cache and the
//! frequency counter that make up the library:
//! - [`bucket_table`]: chaining and open addressing (linear or quadratic probing)
//! - [`cuckoo_table`]: two-table cuckoo hashing with at most two probes per lookup
//! - [`mru_cache`]: bounded cache evicting the least recently used entry
//! - [`frequency`]: most-frequent-token tally over a hash index
//!
//! All structures are single-threaded. Wrap an instance in [`Synchronized`]
//! to share it between threads.

pub mod bucket_table;
pub mod cuckoo_table;
pub mod entry;
pub mod error;
pub mod frequency;
pub mod hash;
pub mod keyed_table;
pub mod mru_cache;
pub mod synchronized;

// Re-export common data structures
pub use bucket_table::{BucketTableConfig, ChainedTable, OpenTable, ProbeStrategy};
pub use cuckoo_table::{CuckooTable, CuckooTableConfig};
pub use entry::Entry;
pub use error::TableError;
pub use frequency::{tally, tally_reader, FrequencyCounter};
pub use hash::{HashFunction, KeyHasher};
pub use keyed_table::KeyedTable;
pub use mru_cache::{MruCache, MruCacheError};
pub use synchronized::Synchronized;
