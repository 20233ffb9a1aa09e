//! Error types for the tagmatch system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! A failed match is never an error; errors only describe malformed rules
//! and rule sets.

use std::fmt;

use thiserror::Error;

/// Convenience alias used across all tagmatch crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for tagmatch operations.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate rule head error.
    #[must_use]
    pub fn duplicate_rule(head: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRule(head.into()))
    }

    /// Creates a dangling reference error.
    #[must_use]
    pub fn undefined_reference(rule: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedReference {
            rule: rule.into(),
            target: target.into(),
        })
    }

    /// Creates a direct self-reference error.
    #[must_use]
    pub fn self_reference(head: impl Into<String>) -> Self {
        Self::new(ErrorKind::SelfReference(head.into()))
    }

    /// Creates a cyclic reference error from the heads along the cycle.
    ///
    /// The path is expected to start and end with the same head.
    #[must_use]
    pub fn cyclic_reference(path: Vec<String>) -> Self {
        Self::new(ErrorKind::CyclicReference(path))
    }

    /// Creates a malformed pattern error.
    #[must_use]
    pub fn malformed_pattern(literal: impl Into<String>, defect: PatternDefect) -> Self {
        Self::new(ErrorKind::MalformedPattern {
            literal: literal.into(),
            defect,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error was raised while building a rule set.
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        !matches!(self.kind, ErrorKind::Internal(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// Two rules share the same head.
    #[error("there are multiple definitions of rule '{0}'")]
    DuplicateRule(String),

    /// A reference literal names a rule that is not defined.
    #[error("rule '{rule}' references a rule that is not defined: #{target}")]
    UndefinedReference {
        /// The rule containing the reference.
        rule: String,
        /// The missing target head.
        target: String,
    },

    /// A rule references its own head.
    #[error("rule '{0}' references itself")]
    SelfReference(String),

    /// Rules reference each other in a cycle.
    #[error("cyclic rule reference: {}", .0.join(" -> "))]
    CyclicReference(Vec<String>),

    /// A literal's token pattern cannot be matched.
    #[error("malformed pattern '{literal}': {defect}")]
    MalformedPattern {
        /// Display form of the offending literal.
        literal: String,
        /// What is wrong with it.
        defect: PatternDefect,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The ways a literal's token pattern can be malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternDefect {
    /// The literal has no tokens.
    Empty,
    /// Two wildcard markers are next to each other.
    AdjacentWildcards {
        /// Index of the second wildcard.
        position: usize,
    },
    /// A reference literal does not consist of exactly one word.
    BadReference,
}

impl fmt::Display for PatternDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pattern has no tokens"),
            Self::AdjacentWildcards { position } => {
                write!(f, "multiple wildcards next to each other at token {position}")
            }
            Self::BadReference => write!(f, "a rule reference must name exactly one rule"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    /// Head of the rule being built or evaluated.
    pub rule: Option<String>,
    /// Index of the disjunction within the rule expression.
    pub disjunction: Option<usize>,
    /// Index of the literal within its disjunction.
    pub literal: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule head.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the disjunction and literal position.
    #[must_use]
    pub fn with_position(mut self, disjunction: usize, literal: usize) -> Self {
        self.disjunction = Some(disjunction);
        self.literal = Some(literal);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "in rule '{rule}'")?;
        }
        if let (Some(d), Some(l)) = (self.disjunction, self.literal) {
            if self.rule.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at clause {d}, literal {l}")?;
        }
        Ok(())
    }
}
