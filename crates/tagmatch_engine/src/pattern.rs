//! Wildcard pattern matching over token sequences.
//!
//! The matcher slides a start index over the input and walks the pattern
//! left to right. Variable-length wildcards jump forward to the first
//! occurrence of the word that follows them (the anchor); there is no
//! backtracking over later anchor occurrences, which keeps the search at
//! O(T * P) per literal.

use tagmatch_foundation::{Error, PatternDefect, Result, Token, TokenSpan};

use crate::literal::{Literal, PatternToken};

/// Outcome of trying the pattern at one start index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Window {
    /// The pattern matched, ending just before this token index.
    Matched(usize),
    /// The pattern does not match at this start.
    Failed,
    /// The input ran out before the pattern did. No later start can match.
    OutOfInput,
}

/// Finds literal patterns in token sequences.
pub struct PatternMatcher;

impl PatternMatcher {
    /// Find the leftmost match of `literal` in `tokens`.
    ///
    /// A negated literal is satisfied over the whole input exactly when the
    /// plain pattern occurs nowhere, and is unsatisfied otherwise.
    ///
    /// Rule references only resolve against a rule set, so they are not
    /// searched for as text.
    ///
    /// # Errors
    /// Returns a malformed pattern error if the pattern is empty, contains
    /// adjacent wildcards, or is a rule reference.
    pub fn find_span(literal: &Literal, tokens: &[Token]) -> Result<Option<TokenSpan>> {
        if literal.is_reference() {
            return Err(Error::malformed_pattern(literal.to_string(), PatternDefect::BadReference));
        }
        literal.validate()?;

        let found = Self::search(&literal.tokens, tokens);
        Ok(match (found, literal.negated) {
            (Some(span), false) => Some(span),
            (None, true) => Some(TokenSpan::whole(tokens.len())),
            (Some(_), true) | (None, false) => None,
        })
    }

    /// Returns true if `literal` is satisfied by `tokens`.
    ///
    /// # Errors
    /// Same as [`PatternMatcher::find_span`].
    pub fn contains(literal: &Literal, tokens: &[Token]) -> Result<bool> {
        Ok(Self::find_span(literal, tokens)?.is_some())
    }

    /// Straight search, ignoring negation.
    fn search(pattern: &[PatternToken], tokens: &[Token]) -> Option<TokenSpan> {
        for start in 0..tokens.len() {
            match Self::match_at(pattern, tokens, start) {
                Window::Matched(end) => return Some(TokenSpan::new(start, end)),
                Window::Failed => {}
                Window::OutOfInput => return None,
            }
        }
        None
    }

    fn match_at(pattern: &[PatternToken], tokens: &[Token], start: usize) -> Window {
        let mut pos = start;
        let mut pi = 0;

        while pi < pattern.len() {
            let current = &pattern[pi];

            if !current.is_variable() {
                let Some(input) = tokens.get(pos) else {
                    return Window::OutOfInput;
                };
                if !current.accepts(input) {
                    return Window::Failed;
                }
                pos += 1;
                pi += 1;
                continue;
            }

            let min_run = usize::from(*current == PatternToken::OneOrMore);

            // Trailing wildcard: nothing to anchor on, take the shortest run
            let Some(anchor) = pattern.get(pi + 1) else {
                if pos + min_run > tokens.len() {
                    return Window::OutOfInput;
                }
                pos += min_run;
                pi += 1;
                continue;
            };

            let from = pos + min_run;
            if from >= tokens.len() {
                return Window::OutOfInput;
            }
            match tokens[from..].iter().position(|t| anchor.accepts(t)) {
                Some(offset) => {
                    pos = from + offset + 1;
                    pi += 2;
                }
                None => return Window::Failed,
            }
        }

        Window::Matched(pos)
    }
}

// =============================================================================
// Tests
// =============================================================================
