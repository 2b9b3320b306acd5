// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bounded most-recently-used cache.
//!
//! The cache composes a hash index with an access-ordered list. The list
//! keeps entries from most recently used (head) to least recently used
//! (tail) and the index maps each key to its list node.
//!
//! - `find` is O(1) and promotes a hit to the head without allocating.
//! - `store` is O(1) and evicts the tail when the bound is exceeded.
//!
//! # Example
//!
//! ```
//! use bucket_cache_lib::data_structures::mru_cache::MruCache;
//!
//! let mut cache = MruCache::new(2)?;
//! cache.store("A", 1)?;
//! cache.store("B", 2)?;
//!
//! // Finding A makes B the eviction candidate
//! assert_eq!(cache.find("A"), Some(&1));
//! let evicted = cache.store("C", 3)?;
//! assert_eq!(evicted.map(|entry| entry.key).as_deref(), Some("B"));
//!
//! assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["C", "A"]);
//! # Ok::<(), bucket_cache_lib::data_structures::mru_cache::MruCacheError>(())
//! ```

mod cache;
mod error;
mod list;

pub use cache::MruCache;
pub use error::{MruCacheError, MruCacheResult};
pub use list::{AccessList, NodeId};
