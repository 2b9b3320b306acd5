//! Cache configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// MRU cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached entries
    pub bound: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { bound: 1024 }
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.bound == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "cache.bound".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
