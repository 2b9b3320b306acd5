//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{BucketCacheConfig, ConfigLoader, CuckooConfig, LogConfig, Validate};
use crate::data_structures::bucket_table::ProbeStrategy;
use crate::data_structures::hash::HashFunction;
use crate::error::config::ConfigError;
use crate::tests::TestFixture;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = BucketCacheConfig::default();
    assert!(config.validate().is_ok());
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = BucketCacheConfig::default();

    config.table.initial_capacity = 0;
    assert!(config.validate().is_err());

    config.table.initial_capacity = 8;
    config.cache.bound = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));

    config.cache.bound = 4;
    config.cuckoo.max_growths = 0;
    assert!(config.validate().is_err());

    config.cuckoo.max_growths = 3;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_cuckoo_hashes_must_differ() {
    let config = CuckooConfig {
        primary_hash: HashFunction::Fnv,
        secondary_hash: HashFunction::Fnv,
        ..CuckooConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "file_test.toml",
            r#"
            [table]
            initial_capacity = 32
            hash = "char_sum"
            probe = "quadratic"

            [cache]
            bound = 7
            "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_BC_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.table.initial_capacity, 32);
    assert_eq!(config.table.hash, HashFunction::CharSum);
    assert_eq!(config.table.probe, ProbeStrategy::Quadratic);
    assert_eq!(config.cache.bound, 7);

    // Other values should be defaults
    assert_eq!(config.cuckoo, CuckooConfig::default());
    assert_eq!(config.log, LogConfig::default());
}

#[test]
fn test_load_json_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "json_test.json",
            r#"{ "cuckoo": { "primary_hash": "first_char", "max_growths": 5 } }"#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_BC_JSON")
        .load()
        .unwrap();
    assert_eq!(config.cuckoo.primary_hash, HashFunction::FirstChar);
    assert_eq!(config.cuckoo.max_growths, 5);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("env_test.toml", "[cache]\nbound = 3\n")
        .unwrap();

    fixture.set_env("TEST_BC_ENV__CACHE__BOUND", "11");
    fixture.set_env("TEST_BC_ENV__LOG__LEVEL", "trace");

    let config = ConfigLoader::new(Some(&config_path), "TEST_BC_ENV")
        .load()
        .unwrap();

    assert_eq!(config.cache.bound, 11);
    assert_eq!(config.log.level, "trace");
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("invalid.toml", "[table\ninitial_capacity = \"")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_BC_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_load_rejects_invalid_values() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("zero.toml", "[cache]\nbound = 0\n")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_BC_ZERO");
    assert!(loader.load().is_err());
}

#[test]
fn test_missing_file_and_unknown_extension() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("absent.toml");
    let loader = ConfigLoader::new(Some(&missing), "TEST_BC_MISSING");
    assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));

    let ini = fixture.create_file("config.ini", "bound=1").unwrap();
    let loader = ConfigLoader::new(Some(&ini), "TEST_BC_INI");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Generated configuration must load back unchanged.
#[test]
fn test_generated_config_round_trips() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&BucketCacheConfig::default()).unwrap();
    let config_path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_BC_GEN")
        .load()
        .unwrap();
    assert_eq!(config, BucketCacheConfig::default());
}
