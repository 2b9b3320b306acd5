//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::data_structures::error::TableError;
use crate::data_structures::mru_cache::{MruCache, MruCacheError};
use crate::data_structures::ChainedTable;
use crate::error::config::ConfigError;
use crate::error::{
    report_error, set_error_reporter, BucketCacheError, BucketCacheResult, ErrorContext,
    ErrorReporter, TracingErrorReporter,
};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = BucketCacheError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = BucketCacheError::Io(io_error);
    assert!(error.to_string().contains("file not found"));

    let error = BucketCacheError::from(TableError::ZeroCapacity);
    assert_eq!(
        error.to_string(),
        "Table error: Table capacity must be greater than zero"
    );

    let error = BucketCacheError::from(MruCacheError::DuplicateKey("k".to_string()));
    assert_eq!(error.to_string(), "Cache error: Key already cached: k");
}

#[test]
fn test_question_mark_conversions() {
    fn build(capacity: usize, bound: usize) -> BucketCacheResult<()> {
        let _table: ChainedTable<u8> = ChainedTable::new(capacity)?;
        let _cache: MruCache<u8> = MruCache::new(bound)?;
        Ok(())
    }

    assert!(build(1, 1).is_ok());
    assert!(matches!(build(0, 1), Err(BucketCacheError::Table(_))));
    assert!(matches!(build(1, 0), Err(BucketCacheError::Cache(MruCacheError::ZeroBound))));
}

#[test]
fn test_table_error_becomes_validation_error() {
    let error = ConfigError::from(TableError::InvalidConfiguration("bad".to_string()));
    assert!(matches!(error, ConfigError::ValidationError(message) if message.contains("bad")));
}

/// Mock error reporter for testing.
#[derive(Debug, Default)]
struct MockErrorReporter {
    reported_count: AtomicUsize,
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, _context: ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that the global error reporter works correctly.
///
/// This is the only test that installs a global reporter.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(MockErrorReporter::default());
    set_error_reporter(reporter.clone());

    report_error(ErrorContext::new(
        BucketCacheError::Custom("test error".to_string()),
        "test_component",
    ));
    report_error(ErrorContext::new(
        BucketCacheError::Custom("second".to_string()),
        "test_component",
    ));

    assert_eq!(reporter.reported_count.load(Ordering::SeqCst), 2);
}

/// Test that the tracing error reporter accepts a context.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = BucketCacheError::Custom("test error".to_string());
    reporter.report(ErrorContext::new(error, "test_component"));
}
