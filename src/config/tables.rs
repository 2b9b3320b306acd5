//! Table configuration module.
//!
//! Serializable settings for the bucket and cuckoo tables. Each struct
//! converts into the builder configuration its table is constructed from.

use serde::{Deserialize, Serialize};

use super::{ConfigResult, Validate};
use crate::data_structures::bucket_table::{BucketTableConfig, ProbeStrategy};
use crate::data_structures::cuckoo_table::{CuckooTableConfig, DEFAULT_MAX_GROWTHS};
use crate::data_structures::hash::HashFunction;

/// Chained and open-addressing table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Initial number of slots
    pub initial_capacity: usize,

    /// Hash function mapping keys to slots
    pub hash: HashFunction,

    /// Probe sequence used by open addressing
    pub probe: ProbeStrategy,
}

impl TableConfig {
    /// Builder configuration for [`ChainedTable`] and [`OpenTable`].
    ///
    /// [`ChainedTable`]: crate::data_structures::ChainedTable
    /// [`OpenTable`]: crate::data_structures::OpenTable
    pub fn to_table_config(&self) -> BucketTableConfig {
        BucketTableConfig::new()
            .with_initial_capacity(self.initial_capacity)
            .with_hash(self.hash)
            .with_probe(self.probe)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        let defaults = BucketTableConfig::default();
        Self {
            initial_capacity: defaults.initial_capacity,
            hash: defaults.hash,
            probe: defaults.probe,
        }
    }
}

impl Validate for TableConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.to_table_config().validate()?;
        Ok(())
    }
}

/// Cuckoo table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuckooConfig {
    /// Initial number of slots per subtable
    pub initial_capacity: usize,

    /// Hash function of subtable 0
    pub primary_hash: HashFunction,

    /// Hash function of subtable 1
    pub secondary_hash: HashFunction,

    /// Maximum growths a single insert may perform
    pub max_growths: usize,
}

impl CuckooConfig {
    /// Builder configuration for [`CuckooTable`](crate::data_structures::CuckooTable).
    pub fn to_table_config(&self) -> CuckooTableConfig {
        CuckooTableConfig::new()
            .with_initial_capacity(self.initial_capacity)
            .with_hash_functions(self.primary_hash, self.secondary_hash)
            .with_max_growths(self.max_growths)
    }
}

impl Default for CuckooConfig {
    fn default() -> Self {
        let defaults = CuckooTableConfig::default();
        Self {
            initial_capacity: defaults.initial_capacity,
            primary_hash: defaults.hash_functions[0],
            secondary_hash: defaults.hash_functions[1],
            max_growths: DEFAULT_MAX_GROWTHS,
        }
    }
}

impl Validate for CuckooConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.to_table_config().validate()?;
        Ok(())
    }
}
