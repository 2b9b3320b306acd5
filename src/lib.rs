//! Bucket Cache Library
//!
//! Hash tables with pluggable collision resolution and a bounded,
//! access-ordered cache:
//! - chained and open-addressing bucket tables with linear or quadratic probing
//! - a two-table cuckoo hash with at most two probes per lookup
//! - an MRU cache evicting the least recently used entry
//! - a token frequency counter
//!
//! The binary crate wraps these in a small command-line tool, but every
//! structure is usable on its own.

pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Bucket Cache.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed global error reporter.
pub fn init() {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
