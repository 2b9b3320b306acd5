//! Bucket Cache - command-line entrypoint.
//!
//! Reads whitespace-separated tokens from a file or standard input and runs
//! them through the library's tables and cache.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use bucket_cache_lib::config::{BucketCacheConfig, ConfigLoader, LogConfig, ENV_PREFIX};
use bucket_cache_lib::data_structures::{
    frequency, ChainedTable, CuckooTable, KeyedTable, MruCache, OpenTable,
};
use bucket_cache_lib::error::{report_error, BucketCacheError, ErrorContext};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Bucket Cache.
#[derive(Parser, Debug)]
#[clap(name = "bucket_cache", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the most frequent token
    Tally {
        /// Token file, standard input when omitted
        #[clap(short, long, value_parser)]
        input: Option<PathBuf>,
    },

    /// Load the tokens into every table kind and the cache, then report
    Stats {
        /// Token file, standard input when omitted
        #[clap(short, long, value_parser)]
        input: Option<PathBuf>,

        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Shape and occupancy of one table after loading the tokens.
#[derive(Debug, Serialize)]
struct TableStats {
    kind: &'static str,
    len: usize,
    capacity: usize,
    load_factor: f64,
}

/// Hit and eviction counts of the cache after replaying the tokens.
#[derive(Debug, Serialize)]
struct CacheStats {
    bound: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

#[derive(Debug, Serialize)]
struct Report {
    tokens: u64,
    distinct: usize,
    most_common: Option<String>,
    tables: Vec<TableStats>,
    cache: CacheStats,
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let installed = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    })
}

fn read_tokens(input: Option<&Path>) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    for line in open_input(input)?.lines() {
        let line = line.context("Failed to read token stream")?;
        tokens.extend(line.split_whitespace().map(str::to_string));
    }
    Ok(tokens)
}

fn table_stats(kind: &'static str, table: &dyn KeyedTable<u64>) -> TableStats {
    TableStats {
        kind,
        len: table.len(),
        capacity: table.capacity(),
        load_factor: table.load_factor(),
    }
}

fn build_report(config: &BucketCacheConfig, tokens: &[String]) -> Result<Report, BucketCacheError> {
    let table_config = config.table.to_table_config();
    let mut chained: ChainedTable<u64> = ChainedTable::with_config(&table_config)?;
    let mut open: OpenTable<u64> = OpenTable::with_config(&table_config)?;
    let mut cuckoo: CuckooTable<u64> = CuckooTable::with_config(&config.cuckoo.to_table_config())?;
    let mut cache = MruCache::new(config.cache.bound)?;
    let mut cache_stats = CacheStats {
        bound: cache.bound(),
        hits: 0,
        misses: 0,
        evictions: 0,
    };

    for (position, token) in (0u64..).zip(tokens) {
        let tables: [&mut dyn KeyedTable<u64>; 3] = [&mut chained, &mut open, &mut cuckoo];
        for table in tables {
            table.insert(token, position)?;
        }
        if cache.find(token).is_some() {
            cache_stats.hits += 1;
        } else {
            cache_stats.misses += 1;
            if cache.store(token.as_str(), position)?.is_some() {
                cache_stats.evictions += 1;
            }
        }
    }

    let counter: frequency::FrequencyCounter = tokens.iter().collect();
    Ok(Report {
        tokens: counter.total(),
        distinct: counter.distinct(),
        most_common: counter.most_common().map(|(token, _)| token.to_string()),
        tables: vec![
            table_stats("chained", &chained),
            table_stats("open", &open),
            table_stats("cuckoo", &cuckoo),
        ],
        cache: cache_stats,
    })
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("tokens: {} ({} distinct)", report.tokens, report.distinct);
    if let Some(token) = &report.most_common {
        println!("most common: {token}");
    }
    for table in &report.tables {
        println!(
            "{:<8} len={:<8} capacity={:<8} load_factor={:.3}",
            table.kind, table.len, table.capacity, table.load_factor
        );
    }
    let cache = &report.cache;
    println!(
        "cache    bound={} hits={} misses={} evictions={}",
        cache.bound, cache.hits, cache.misses, cache.evictions
    );
    Ok(())
}

fn load_config(loader: &ConfigLoader) -> BucketCacheConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet, fall back to defaults to report
            let _ = init_logging(&LogConfig::default());
            report_error(
                ErrorContext::new(BucketCacheError::Config(e), "config")
                    .with_details("failed to load configuration"),
            );
            process::exit(1);
        }
    }
}

/// Main entry point for the application.
fn main() -> Result<()> {
    let args = Args::parse();
    bucket_cache_lib::init();

    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    match args.command {
        Command::Tally { input } => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            let reader = open_input(input.as_deref())?;
            match frequency::tally_reader(reader).context("Failed to read token stream")? {
                Some(token) => println!("{token}"),
                None => info!("no tokens in input"),
            }
            Ok(())
        }
        Command::Stats { input, json } => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            let tokens = read_tokens(input.as_deref())?;
            info!(tokens = tokens.len(), "loading tokens");
            let report = build_report(&config, &tokens)?;
            print_report(&report, json)
        }
        Command::Validate => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");

            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {parent:?}"))?;
            }
            let toml = toml::to_string_pretty(&BucketCacheConfig::default())
                .context("Failed to serialize config")?;
            fs::write(&output, toml).with_context(|| format!("Failed to write {output:?}"))?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_report_counts() {
        let config = BucketCacheConfig::default();
        let report = build_report(&config, &tokens("a b a c a b")).unwrap();

        assert_eq!(report.tokens, 6);
        assert_eq!(report.distinct, 3);
        assert_eq!(report.most_common.as_deref(), Some("a"));

        // Chaining keeps every occurrence, the others keep one per key
        let lens: Vec<_> = report.tables.iter().map(|t| (t.kind, t.len)).collect();
        assert_eq!(lens, vec![("chained", 6), ("open", 3), ("cuckoo", 3)]);

        assert_eq!(report.cache.hits, 3);
        assert_eq!(report.cache.misses, 3);
        assert_eq!(report.cache.evictions, 0);
    }

    #[test]
    fn test_report_counts_evictions() {
        let mut config = BucketCacheConfig::default();
        config.cache.bound = 1;
        let report = build_report(&config, &tokens("x y x")).unwrap();

        assert_eq!(report.cache.hits, 0);
        assert_eq!(report.cache.evictions, 2);
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(&BucketCacheConfig::default(), &tokens("k")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tables"][2]["kind"], "cuckoo");
        assert_eq!(json["cache"]["misses"], 1);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["bucket_cache", "stats", "--json"]).unwrap();
        assert!(matches!(args.command, Command::Stats { json: true, input: None }));
    }
}
