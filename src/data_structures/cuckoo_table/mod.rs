// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Cuckoo hash table with two subtables.
//!
//! Each key has exactly one candidate slot per subtable, so a lookup
//! inspects at most two slots. Inserts resolve collisions by displacing
//! the current occupant into its slot in the other subtable.
//!
//! # Features
//!
//! - Worst-case constant lookups
//! - Pluggable hash strategies per subtable
//! - Automatic growth when displacement cycles
//! - A bounded growth budget, so hash pairs that cannot separate some keys
//!   fail cleanly and leave the table as it was
//!
//! # Example
//!
//! ```
//! use bucket_cache_lib::data_structures::cuckoo_table::{CuckooTable, CuckooTableConfig};
//! use bucket_cache_lib::data_structures::hash::HashFunction;
//!
//! let config = CuckooTableConfig::new()
//!     .with_initial_capacity(4)
//!     .with_hash_functions(HashFunction::CharSum, HashFunction::Fnv);
//! let mut table = CuckooTable::with_config(&config)?;
//!
//! table.insert("hello", 42)?;
//! assert_eq!(table.find("hello"), Some(&42));
//! assert_eq!(table.find("world"), None);
//!
//! // Inserting the same key again replaces the value
//! assert_eq!(table.insert("hello", 7)?, Some(42));
//! # Ok::<(), bucket_cache_lib::data_structures::TableError>(())
//! ```

mod config;
mod table;

pub use config::{CuckooTableConfig, DEFAULT_MAX_GROWTHS};
pub use table::{CuckooTable, InsertError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::hash::HashFunction;

    #[test]
    fn test_config_drives_hashers() {
        let config = CuckooTableConfig::new()
            .with_initial_capacity(7)
            .with_hash_functions(HashFunction::FirstChar, HashFunction::CharSum);
        let table: CuckooTable<u32> = CuckooTable::with_config(&config).unwrap();

        assert_eq!(table.capacity(), 7);
        assert_eq!(table.home_slot(0, "b"), 1);
        assert_eq!(table.home_slot(1, "bc"), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CuckooTableConfig::new().with_hash_functions(HashFunction::Fnv, HashFunction::Fnv);
        assert!(CuckooTable::<u32>::with_config(&config).is_err());
    }
}
