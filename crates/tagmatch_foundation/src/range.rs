//! Token spans and match ranges.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A half-open range of token indices `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenSpan {
    /// First token index (inclusive).
    pub start: usize,
    /// Token index just past the span (exclusive).
    pub end: usize,
}

impl TokenSpan {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The span covering a whole sequence of `len` tokens.
    #[must_use]
    pub const fn whole(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Number of tokens covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no tokens.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The span of a satisfied rule, in both token and character offsets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchRange {
    /// Head of the rule that matched.
    pub label: String,
    /// First matched token (inclusive).
    pub token_start: usize,
    /// Token index just past the match (exclusive).
    pub token_end: usize,
    /// First matched character (inclusive).
    pub char_start: usize,
    /// Character offset just past the match (exclusive).
    pub char_end: usize,
}

impl MatchRange {
    /// Builds a match range from a token span over `tokens`.
    ///
    /// Character offsets are taken from the first and last covered token.
    /// An empty span (only possible over an empty input) sits at the end of
    /// the token preceding it, or at offset 0.
    #[must_use]
    pub fn from_span(label: impl Into<String>, span: TokenSpan, tokens: &[Token]) -> Self {
        let (char_start, char_end) = match (tokens.get(span.start), span.end.checked_sub(1)) {
            (Some(first), Some(last)) if !span.is_empty() && last < tokens.len() => {
                (first.char_start(), tokens[last].char_end())
            }
            _ => {
                let at = span
                    .start
                    .checked_sub(1)
                    .and_then(|i| tokens.get(i))
                    .map_or(0, Token::char_end);
                (at, at)
            }
        };

        Self {
            label: label.into(),
            token_start: span.start,
            token_end: span.end,
            char_start,
            char_end,
        }
    }

    /// The token span of this match.
    #[must_use]
    pub const fn span(&self) -> TokenSpan {
        TokenSpan::new(self.token_start, self.token_end)
    }
}

impl fmt::Display for MatchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tokens {} chars [{}, {})",
            self.label,
            self.span(),
            self.char_start,
            self.char_end
        )
    }
}
