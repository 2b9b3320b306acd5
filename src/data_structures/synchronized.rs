// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Single-lock wrapper for sharing a table or cache between threads.
//!
//! Every structure in this crate is single-threaded. Resizing and cuckoo
//! growth replace whole backing arrays, so a concurrent host serializes all
//! operations on one instance behind one mutex.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// A structure shared behind a single [`parking_lot::Mutex`].
///
/// Cloning is cheap and yields another handle to the same instance.
#[derive(Debug, Default)]
pub struct Synchronized<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Synchronized<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Runs `f` with exclusive access to the wrapped structure.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Locks the structure for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Returns the wrapped structure if this is the last handle.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for Synchronized<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::data_structures::cuckoo_table::CuckooTable;
    use crate::data_structures::mru_cache::MruCache;

    #[test]
    fn test_concurrent_inserts() {
        let table = Synchronized::new(CuckooTable::new(4).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let table = table.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let key = format!("w{worker}-{i}");
                        table.with(|t| t.insert(key, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let table = table.try_unwrap().unwrap();
        assert_eq!(table.len(), 200);
        assert_eq!(table.find("w3-49"), Some(&49));
    }

    #[test]
    fn test_guard_spans_operations() {
        let cache = Synchronized::new(MruCache::new(2).unwrap());
        {
            let mut guard = cache.lock();
            guard.store("a", 1).unwrap();
            guard.store("b", 2).unwrap();
            assert_eq!(guard.find("a"), Some(&1));
        }
        assert_eq!(cache.with(|c| c.lru_key().map(str::to_string)), Some("b".to_string()));
    }
}
