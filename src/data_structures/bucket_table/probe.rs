// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Probe sequences for open addressing.

use serde::{Deserialize, Serialize};

/// How an open-addressing table walks from a key's home slot to alternates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// `start, start + 1, start + 2, ...`
    ///
    /// Visits every slot within `capacity` probes.
    #[default]
    Linear,

    /// `start, start + 1, start + 3, start + 6, ...` (triangular offsets).
    ///
    /// Visits every slot when the capacity is a power of two. For other
    /// capacities some slots are skipped, but the first `m` offsets with
    /// `m(m + 1) / 2 < capacity` are always distinct, so growing the table
    /// always lengthens the set of reachable slots.
    Quadratic,
}

impl ProbeStrategy {
    /// Returns the probe sequence for a key whose home slot is `start`.
    ///
    /// The sequence yields exactly `capacity` slot indices, each in
    /// `0..capacity`. Insert and lookup must walk the same sequence.
    pub fn sequence(self, start: usize, capacity: usize) -> ProbeSequence {
        ProbeSequence {
            strategy: self,
            start,
            capacity,
            step: 0,
            offset: 0,
        }
    }
}

/// Iterator over the slots probed for one key.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    strategy: ProbeStrategy,
    start: usize,
    capacity: usize,
    step: usize,
    offset: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let index = (self.start + self.offset) % self.capacity;
        self.step += 1;
        // Offsets stay reduced modulo capacity so they never overflow
        self.offset = match self.strategy {
            ProbeStrategy::Linear => self.step,
            ProbeStrategy::Quadratic => (self.offset + self.step) % self.capacity,
        };
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
