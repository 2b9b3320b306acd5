// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Token frequency counting over a hash index.

use std::io::{self, BufRead};

use hashbrown::HashMap;

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: u64,
    first_seen: u64,
}

/// Counts occurrences of string tokens.
///
/// Ties on the highest count resolve to the token that appeared first.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    counts: HashMap<String, Tally>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `token`.
    pub fn record(&mut self, token: &str) {
        let first_seen = self.total;
        self.counts
            .entry_ref(token)
            .or_insert(Tally {
                count: 0,
                first_seen,
            })
            .count += 1;
        self.total += 1;
    }

    /// Number of times `token` was recorded.
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).map_or(0, |tally| tally.count)
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of recorded occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the most frequent token and its count.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(token, tally)| (token.as_str(), tally.count))
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyCounter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, tokens: I) {
        for token in tokens {
            self.record(token.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyCounter {
    fn from_iter<I: IntoIterator<Item = S>>(tokens: I) -> Self {
        let mut counter = Self::new();
        counter.extend(tokens);
        counter
    }
}

/// Returns the most frequent token of a stream, or `None` for an empty one.
pub fn tally<I, S>(tokens: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let counter: FrequencyCounter = tokens.into_iter().collect();
    counter.most_common().map(|(token, _)| token.to_string())
}

/// Reads whitespace-separated tokens from `reader` into a counter.
pub fn count_reader<R: BufRead>(reader: R) -> io::Result<FrequencyCounter> {
    let mut counter = FrequencyCounter::new();
    for line in reader.lines() {
        counter.extend(line?.split_whitespace());
    }
    Ok(counter)
}

/// Returns the most frequent whitespace-separated token read from `reader`.
pub fn tally_reader<R: BufRead>(reader: R) -> io::Result<Option<String>> {
    let counter = count_reader(reader)?;
    Ok(counter.most_common().map(|(token, _)| token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_most_frequent() {
        let tokens = ["the", "cat", "the", "dog", "the", "cat"];
        assert_eq!(tally(tokens), Some("the".to_string()));
    }

    #[test]
    fn test_tally_empty() {
        assert_eq!(tally(Vec::<String>::new()), None);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        assert_eq!(tally(["b", "a", "a", "b"]), Some("b".to_string()));
        assert_eq!(tally(["x", "y", "z"]), Some("x".to_string()));
    }

    #[test]
    fn test_counter_accessors() {
        let counter: FrequencyCounter = ["a", "b", "a"].into_iter().collect();
        assert_eq!(counter.count("a"), 2);
        assert_eq!(counter.count("b"), 1);
        assert_eq!(counter.count("missing"), 0);
        assert_eq!(counter.distinct(), 2);
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.most_common(), Some(("a", 2)));
    }

    #[test]
    fn test_tally_reader() {
        let input = "alpha beta\n  gamma beta\n\nbeta alpha\n";
        let result = tally_reader(input.as_bytes()).unwrap();
        assert_eq!(result, Some("beta".to_string()));

        assert_eq!(tally_reader("   \n\n".as_bytes()).unwrap(), None);
    }
}
