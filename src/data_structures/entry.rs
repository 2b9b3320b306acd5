// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The key/value pair stored by every table.

/// An owned key/value pair.
///
/// An entry is owned by exactly one slot at a time. Tables move entries
/// between slots (on displacement or rehash) and never copy them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// Lookup key
    pub key: String,
    /// Stored payload
    pub value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry.
    pub fn new<K: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<K: Into<String>, V> From<(K, V)> for Entry<V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
