//! Literals: the atomic tests of a CNF rule.
//!
//! A literal is either a token pattern (a sequence of words and wildcards)
//! or a reference to another rule's outcome. Either kind may be negated.
//! Literals compare and hash structurally so that equal literals built
//! independently share one memoized result during evaluation.

use std::fmt;

use tagmatch_foundation::{Error, PatternDefect, Result, Token};

// =============================================================================
// Pattern Tokens
// =============================================================================

/// One position of a literal's token pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternToken {
    /// Must equal the input token's word exactly.
    Word(String),
    /// Matches exactly one input token (`?`).
    Single,
    /// Matches a run of at least one token (`+`).
    OneOrMore,
    /// Matches a possibly empty run of tokens (`*`).
    ZeroOrMore,
}

impl PatternToken {
    /// Creates a word token.
    #[must_use]
    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    /// Classifies a word using the conventional wildcard notation.
    ///
    /// `?`, `+` and `*` become wildcards; anything else is a word.
    #[must_use]
    pub fn parse_word(word: &str) -> Self {
        match word {
            "?" => Self::Single,
            "+" => Self::OneOrMore,
            "*" => Self::ZeroOrMore,
            _ => Self::Word(word.to_string()),
        }
    }

    /// Returns true for any of the wildcard markers.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Word(_))
    }

    /// Returns true for the variable-length wildcards.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::OneOrMore | Self::ZeroOrMore)
    }

    /// Returns true if this pattern position accepts `token` on its own.
    ///
    /// Wildcards accept any token.
    #[must_use]
    pub fn accepts(&self, token: &Token) -> bool {
        match self {
            Self::Word(w) => w == token.word(),
            _ => true,
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => f.write_str(w),
            Self::Single => f.write_str("?"),
            Self::OneOrMore => f.write_str("+"),
            Self::ZeroOrMore => f.write_str("*"),
        }
    }
}

// =============================================================================
// Literal
// =============================================================================

/// Distinguishes text patterns from references to other rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Searched for in the token sequence.
    Pattern,
    /// True when the named rule is satisfied.
    Reference,
}

/// An atomic test within a rule expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    /// The token pattern. A reference holds a single word: the target head.
    pub tokens: Vec<PatternToken>,
    /// Whether the outcome is inverted.
    pub negated: bool,
    /// Pattern or rule reference.
    pub kind: LiteralKind,
}

impl Literal {
    /// Creates a pattern literal from pattern tokens.
    ///
    /// # Errors
    /// Returns a malformed pattern error if the pattern is empty or has two
    /// adjacent wildcards.
    pub fn pattern(tokens: impl IntoIterator<Item = PatternToken>) -> Result<Self> {
        let literal = Self {
            tokens: tokens.into_iter().collect(),
            negated: false,
            kind: LiteralKind::Pattern,
        };
        literal.validate()?;
        Ok(literal)
    }

    /// Creates a pattern literal from words in wildcard notation.
    ///
    /// # Errors
    /// Same as [`Literal::pattern`].
    pub fn words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::pattern(words.into_iter().map(|w| PatternToken::parse_word(w.as_ref())))
    }

    /// Creates a literal referencing the rule named `head`.
    #[must_use]
    pub fn reference(head: impl Into<String>) -> Self {
        Self {
            tokens: vec![PatternToken::Word(head.into())],
            negated: false,
            kind: LiteralKind::Reference,
        }
    }

    /// Returns this literal negated.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Returns true for rule references.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.kind == LiteralKind::Reference
    }

    /// The head this literal refers to, for well-formed references.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match (self.kind, self.tokens.as_slice()) {
            (LiteralKind::Reference, [PatternToken::Word(head)]) => Some(head),
            _ => None,
        }
    }

    /// Number of pattern tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the pattern has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks the pattern shape.
    ///
    /// # Errors
    /// Returns a malformed pattern error for an empty pattern, adjacent
    /// wildcards, or a reference that is not a single word.
    pub fn validate(&self) -> Result<()> {
        let defect = if self.tokens.is_empty() {
            Some(PatternDefect::Empty)
        } else if self.kind == LiteralKind::Reference {
            self.target().is_none().then_some(PatternDefect::BadReference)
        } else {
            self.tokens
                .windows(2)
                .position(|pair| pair[0].is_wildcard() && pair[1].is_wildcard())
                .map(|i| PatternDefect::AdjacentWildcards { position: i + 1 })
        };

        match defect {
            Some(defect) => Err(Error::malformed_pattern(self.to_string(), defect)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("-")?;
        }
        if self.is_reference() {
            f.write_str("#")?;
        }
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
