// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the cuckoo table.

use crate::data_structures::error::{Result, TableError};
use crate::data_structures::hash::HashFunction;

/// Default bound on growths performed by a single insert or resize.
pub const DEFAULT_MAX_GROWTHS: usize = 12;

/// Configuration for the cuckoo table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuckooTableConfig {
    /// Initial number of slots in each of the two subtables.
    pub initial_capacity: usize,

    /// Hash functions for subtable 0 and subtable 1.
    /// They must differ, otherwise both subtables share every home slot.
    pub hash_functions: [HashFunction; 2],

    /// Maximum number of growths one insert may trigger before giving up.
    /// Any pair that maps a group of three keys to the same two slots reaches
    /// it, e.g. `FirstChar` with `CharSum` on anagrams sharing a first letter.
    pub max_growths: usize,
}

impl CuckooTableConfig {
    /// Creates a new configuration with default values.
    ///
    /// # Returns
    ///
    /// A new `CuckooTableConfig` instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of each subtable.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - The initial number of slots per subtable.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the hash functions for the two subtables.
    ///
    /// # Arguments
    ///
    /// * `primary` - Hash function of subtable 0.
    /// * `secondary` - Hash function of subtable 1.
    pub fn with_hash_functions(mut self, primary: HashFunction, secondary: HashFunction) -> Self {
        self.hash_functions = [primary, secondary];
        self
    }

    /// Sets the maximum number of growths per insert.
    pub fn with_max_growths(mut self, max_growths: usize) -> Self {
        self.max_growths = max_growths;
        self
    }

    /// Checks that the configuration can build a table.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        if self.hash_functions[0] == self.hash_functions[1] {
            return Err(TableError::InvalidConfiguration(format!(
                "cuckoo subtables need distinct hash functions, both are {:?}",
                self.hash_functions[0]
            )));
        }
        if self.max_growths == 0 {
            return Err(TableError::InvalidConfiguration(
                "max_growths must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CuckooTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            hash_functions: [HashFunction::Windowed, HashFunction::Fnv],
            max_growths: DEFAULT_MAX_GROWTHS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CuckooTableConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_identical_hash_functions() {
        let config = CuckooTableConfig::new()
            .with_hash_functions(HashFunction::Windowed, HashFunction::Windowed);
        assert!(matches!(
            config.validate(),
            Err(TableError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_values() {
        let config = CuckooTableConfig::new().with_initial_capacity(0);
        assert_eq!(config.validate(), Err(TableError::ZeroCapacity));

        let config = CuckooTableConfig::new().with_max_growths(0);
        assert!(config.validate().is_err());
    }
}
