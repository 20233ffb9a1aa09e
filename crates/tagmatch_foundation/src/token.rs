//! Tokens of the input text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A word of the input text together with its source character span.
///
/// Tokens are produced by an external tokenizer. Character offsets count
/// `char`s, not bytes, and the span is half-open: `[char_start, char_end)`.
///
/// Equality and hashing look at the word only, so two occurrences of the
/// same word at different positions compare equal.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    word: Arc<str>,
    char_start: usize,
    char_end: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(word: impl Into<Arc<str>>, char_start: usize, char_end: usize) -> Self {
        Self {
            word: word.into(),
            char_start,
            char_end,
        }
    }

    /// The word content.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// First character offset covered by this token.
    #[must_use]
    pub const fn char_start(&self) -> usize {
        self.char_start
    }

    /// Character offset just past this token.
    #[must_use]
    pub const fn char_end(&self) -> usize {
        self.char_end
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.word, self.char_start, self.char_end)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}
