// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key hash functions shared by every table in this crate.
//!
//! A table never hard-wires its hash function. It holds a [`KeyHasher`]
//! strategy, which is either one of the built-in [`HashFunction`] variants or
//! any `Fn(&str) -> u64` closure. The variants trade range, uniformity and
//! computation cost:
//!
//! | Variant     | Range                  | Cost           |
//! |-------------|------------------------|----------------|
//! | `FirstChar` | about 26 values        | O(1)           |
//! | `CharSum`   | grows with key length  | O(len)         |
//! | `Windowed`  | wider than `CharSum`   | O(1), 15 chars |
//! | `Fnv`       | full `u64`             | O(len)         |

use std::hash::Hasher;

use serde::{Deserialize, Serialize};

/// Number of characters the windowed hash consumes before stopping.
const WINDOW: u32 = 15;

/// Strategy that maps a key to an unsigned integer.
///
/// Implementations must be total and deterministic: the same key always
/// yields the same value, for the lifetime of the table using it.
pub trait KeyHasher {
    /// Hashes `key`.
    fn hash(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// The built-in hash function family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFunction {
    /// Offset of the first character from `'a'`.
    ///
    /// Collides on every pair of keys sharing a leading character. Useful as a
    /// worst case, never a default.
    FirstChar,

    /// Sum of every character's offset from `'a'`.
    CharSum,

    /// Sum of the first 15 character offsets, each shifted by its countdown
    /// position modulo 4.
    #[default]
    Windowed,

    /// FNV-1a over the key bytes.
    Fnv,
}

impl HashFunction {
    /// Every variant, in declaration order.
    pub const ALL: [HashFunction; 4] = [
        HashFunction::FirstChar,
        HashFunction::CharSum,
        HashFunction::Windowed,
        HashFunction::Fnv,
    ];
}

impl KeyHasher for HashFunction {
    fn hash(&self, key: &str) -> u64 {
        match self {
            HashFunction::FirstChar => first_char(key),
            HashFunction::CharSum => char_sum(key),
            HashFunction::Windowed => windowed(key),
            HashFunction::Fnv => fnv(key),
        }
    }
}

#[inline]
fn offset(c: char) -> u64 {
    u64::from(c).wrapping_sub(u64::from('a'))
}

/// Hashes a key by its first character only. The empty key hashes to 0.
pub fn first_char(key: &str) -> u64 {
    key.chars().next().map_or(0, offset)
}

/// Hashes a key by summing all of its character offsets.
pub fn char_sum(key: &str) -> u64 {
    key.chars().fold(0u64, |acc, c| acc.wrapping_add(offset(c)))
}

/// Hashes at most the first 15 characters of a key.
///
/// The countdown starts at 15 for the first character and the `n`-th value
/// is shifted left by `countdown % 4` bits before being summed.
pub fn windowed(key: &str) -> u64 {
    key.chars()
        .zip((1..=WINDOW).rev())
        .fold(0u64, |acc, (c, countdown)| {
            acc.wrapping_add(offset(c).wrapping_shl(countdown % 4))
        })
}

/// FNV-1a hash of the key's UTF-8 bytes.
pub fn fnv(key: &str) -> u64 {
    let mut hasher = fnv::FnvHasher::default();
    hasher.write(key.as_bytes());
    hasher.finish()
}
