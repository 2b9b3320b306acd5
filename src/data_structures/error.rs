// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types shared by the bucket and cuckoo tables.

/// Errors raised by table construction and resizing.
///
/// A missing key is never an error; lookups return `None`.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TableError {
    /// A table was created or resized with zero slots
    #[error("Table capacity must be greater than zero")]
    ZeroCapacity,

    /// The table configuration is invalid
    #[error("Invalid table configuration: {0}")]
    InvalidConfiguration(String),

    /// Cuckoo rehashing found no layout within the growth bound.
    /// The table is unchanged and the entry for `key` was not stored.
    #[error("Rehashing failed after {growths} growths, entry for key '{key}' was not stored")]
    RehashingFailed {
        /// Key of the entry that could not be placed
        key: String,
        /// Number of layouts attempted before giving up
        growths: usize,
    },
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::ZeroCapacity;
        assert_eq!(err.to_string(), "Table capacity must be greater than zero");

        let err = TableError::RehashingFailed {
            key: "k".to_string(),
            growths: 3,
        };
        assert_eq!(
            err.to_string(),
            "Rehashing failed after 3 growths, entry for key 'k' was not stored"
        );
    }
}
