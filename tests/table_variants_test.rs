// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Scenario tests run once per table variant and hash function.

use test_case::test_case;

use bucket_cache_lib::data_structures::bucket_table::{ChainedTable, OpenTable, ProbeStrategy};
use bucket_cache_lib::data_structures::cuckoo_table::{CuckooTable, CuckooTableConfig};
use bucket_cache_lib::data_structures::hash::{windowed, HashFunction, KeyHasher};
use bucket_cache_lib::data_structures::{tally, KeyedTable, TableError};

#[derive(Debug, Clone, Copy)]
enum Variant {
    Chained,
    Linear,
    Quadratic,
    Cuckoo,
}

fn build(variant: Variant, capacity: usize, hash: HashFunction) -> Box<dyn KeyedTable<u32>> {
    match variant {
        Variant::Chained => Box::new(ChainedTable::with_hasher(capacity, hash).unwrap()),
        Variant::Linear => {
            Box::new(OpenTable::with_hasher(capacity, ProbeStrategy::Linear, hash).unwrap())
        }
        Variant::Quadratic => {
            Box::new(OpenTable::with_hasher(capacity, ProbeStrategy::Quadratic, hash).unwrap())
        }
        Variant::Cuckoo => {
            let secondary = if hash == HashFunction::Fnv {
                HashFunction::Windowed
            } else {
                HashFunction::Fnv
            };
            let config = CuckooTableConfig::new()
                .with_initial_capacity(capacity)
                .with_hash_functions(hash, secondary);
            Box::new(CuckooTable::with_config(&config).unwrap())
        }
    }
}

const WORDS: [&str; 12] = [
    "apple", "banana", "cherry", "date", "elder", "fig", "grape", "honeydew", "kiwi", "lemon",
    "mango", "nectarine",
];

#[test_case(Variant::Chained, HashFunction::FirstChar)]
#[test_case(Variant::Chained, HashFunction::Windowed)]
#[test_case(Variant::Linear, HashFunction::FirstChar)]
#[test_case(Variant::Linear, HashFunction::CharSum)]
#[test_case(Variant::Quadratic, HashFunction::CharSum)]
#[test_case(Variant::Quadratic, HashFunction::Fnv)]
#[test_case(Variant::Cuckoo, HashFunction::Windowed)]
#[test_case(Variant::Cuckoo, HashFunction::FirstChar)]
fn test_words_survive_resizes(variant: Variant, hash: HashFunction) {
    let mut table = build(variant, 2, hash);
    for (i, word) in (0u32..).zip(WORDS) {
        table.insert(word, i).unwrap();
    }
    for new_capacity in [1, 5, 64, 3] {
        table.resize(new_capacity).unwrap();
        for (i, word) in (0u32..).zip(WORDS) {
            assert_eq!(table.find(word), Some(&i), "{word} after resize to {new_capacity}");
        }
    }
    assert_eq!(table.len(), WORDS.len());
    assert_eq!(table.find("zucchini"), None);
}

#[test_case(Variant::Chained)]
#[test_case(Variant::Linear)]
#[test_case(Variant::Quadratic)]
#[test_case(Variant::Cuckoo)]
fn test_zero_capacity_resize_is_rejected(variant: Variant) {
    let mut table = build(variant, 4, HashFunction::Windowed);
    table.insert("kept", 1).unwrap();
    assert_eq!(table.resize(0), Err(TableError::ZeroCapacity));
    assert_eq!(table.find("kept"), Some(&1));
}

#[test]
fn test_chaining_scenario() {
    assert_eq!(windowed("ab") % 4, windowed("cd") % 4);

    let mut table = ChainedTable::new(4).unwrap();
    table.insert("ab", 1);
    table.insert("cd", 2);
    assert_eq!(table.find("ab"), Some(&1));
    assert_eq!(table.find("cd"), Some(&2));
}

#[test_case(ProbeStrategy::Linear)]
#[test_case(ProbeStrategy::Quadratic)]
fn test_full_open_table_grows_to_nine(probe: ProbeStrategy) {
    let mut table = OpenTable::with_hasher(4, probe, HashFunction::FirstChar).unwrap();
    // First characters a, b, c, d fill slots 0..4 exactly
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        table.insert(*key, i);
    }
    assert_eq!(table.capacity(), 4);

    table.insert("e", 4);
    assert_eq!(table.capacity(), 9);
    for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        assert_eq!(table.find(key), Some(&i));
    }
}

#[test_case(&["red", "blue", "red"], Some("red"); "clear winner")]
#[test_case(&["one", "two"], Some("one"); "tie goes to first seen")]
#[test_case(&[], None; "empty stream")]
fn test_tally(tokens: &[&str], expected: Option<&str>) {
    assert_eq!(tally(tokens.iter()).as_deref(), expected);
}

#[test]
fn test_custom_hasher_closure() {
    let by_length = |key: &str| key.len() as u64;
    assert_eq!(by_length.hash("four"), 4);

    let mut table = OpenTable::with_hasher(8, ProbeStrategy::Linear, by_length).unwrap();
    table.insert("aa", 1);
    table.insert("bb", 2);
    assert_eq!(table.home_slot("aa"), 2);
    assert_eq!(table.slot_of("bb"), Some(3));
}
