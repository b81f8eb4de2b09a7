//! Word validation and normalization.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a raw word is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidWordError {
    /// Nothing left after trimming whitespace.
    #[error("word is empty")]
    Empty,

    /// Contains something other than an ASCII letter.
    #[error("word contains non-letter character {0:?}")]
    NonLetter(char),
}

/// A validated word: non-empty, ASCII letters only, lowercased.
///
/// This is the only way to build a key for the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

impl Word {
    /// Trim, validate and lowercase a raw word.
    pub fn parse(raw: &str) -> Result<Self, InvalidWordError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidWordError::Empty);
        }

        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(InvalidWordError::NonLetter(bad));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Word {
    type Err = InvalidWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
