//! Test modules for Bucket Cache.
//!
//! Unit tests live next to each data structure. This module holds the
//! cross-cutting tests:
//! - configuration loading and validation
//! - error aggregation and reporting
//! - shared proptest strategies and fixtures

pub mod config_tests;
pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, key_strategy, keys_strategy, TestFixture};
