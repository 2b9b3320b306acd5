// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the bucket tables.

use super::probe::ProbeStrategy;
use crate::data_structures::error::{Result, TableError};
use crate::data_structures::hash::HashFunction;

/// Configuration shared by [`ChainedTable`](super::ChainedTable) and
/// [`OpenTable`](super::OpenTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketTableConfig {
    /// Number of slots the table starts with.
    pub initial_capacity: usize,

    /// Hash function used to pick a key's home slot.
    pub hash: HashFunction,

    /// Probe sequence for open addressing. Ignored by chaining.
    pub probe: ProbeStrategy,
}

impl BucketTableConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of slots.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the hash function.
    pub fn with_hash(mut self, hash: HashFunction) -> Self {
        self.hash = hash;
        self
    }

    /// Sets the probe strategy.
    pub fn with_probe(mut self, probe: ProbeStrategy) -> Self {
        self.probe = probe;
        self
    }

    /// Checks that the configuration can build a table.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for BucketTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            hash: HashFunction::Windowed,
            probe: ProbeStrategy::Linear,
        }
    }
}
