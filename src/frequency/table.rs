//! Shared word → count table.
//!
//! # Responsibilities
//! - Own the word counts for the lifetime of the process
//! - Serialize increments against each other and against scans
//! - Answer "most frequent word with this prefix" from a consistent snapshot
//!
//! # Design Decisions
//! - `parking_lot::RwLock` does not poison, so a panicking caller elsewhere
//!   can never wedge the table
//! - Keys live in a `BTreeMap`, so a prefix scan only walks the matching
//!   range and visits candidates in lexicographic order
//! - Counts saturate at `u64::MAX`

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::frequency::word::{InvalidWordError, Word};

/// Thread-safe word frequency table.
///
/// Constructed once and shared via `Arc`; the map itself is never handed out.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    words: RwLock<BTreeMap<String, u64>>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw word and count one occurrence of it.
    ///
    /// Invalid input leaves the table untouched.
    pub fn record(&self, raw: &str) -> Result<(), InvalidWordError> {
        let word = Word::parse(raw)?;
        self.record_word(&word);
        Ok(())
    }

    /// Count one occurrence of an already validated word.
    pub fn record_word(&self, word: &Word) {
        let mut words = self.words.write();
        match words.get_mut(word.as_str()) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                words.insert(word.as_str().to_owned(), 1);
            }
        }
    }

    /// Most frequent word starting with `prefix` (case-insensitive).
    ///
    /// An empty prefix matches every word. Equal counts resolve to the
    /// lexicographically smallest word. Returns `None` when nothing matches.
    pub fn most_frequent_with_prefix(&self, prefix: &str) -> Option<String> {
        let prefix = prefix.to_lowercase();
        let words = self.words.read();

        let mut best: Option<(&str, u64)> = None;
        let range = words.range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded));
        for (word, &count) in range.take_while(|(word, _)| word.starts_with(&prefix)) {
            // Strict comparison keeps the earliest (smallest) word on ties.
            if best.map_or(true, |(_, max)| count > max) {
                best = Some((word.as_str(), count));
            }
        }

        best.map(|(word, _)| word.to_owned())
    }

    /// Stored count for `word`, 0 if it has never been recorded.
    pub fn count(&self, word: &str) -> u64 {
        let key = word.trim().to_ascii_lowercase();
        self.words.read().get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}
