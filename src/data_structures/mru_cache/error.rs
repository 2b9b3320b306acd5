// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the MRU cache.

/// Errors that can occur in MRU cache operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum MruCacheError {
    /// Error when a cache is created with room for no entries.
    #[error("Cache bound must be greater than zero")]
    ZeroBound,

    /// Error when storing a key that is already cached.
    #[error("Key already cached: {0}")]
    DuplicateKey(String),
}

/// Result type for MRU cache operations.
pub type MruCacheResult<T> = std::result::Result<T, MruCacheError>;
