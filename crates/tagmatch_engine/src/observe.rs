//! Evaluation events and the observer seam.
//!
//! The evaluator reports what it does through an [`EvalObserver`]. The
//! default [`NoopObserver`] ignores everything; a tracer or a test counter
//! can be plugged in instead. Observers are shared across worker threads
//! during parallel evaluation, so they must be `Sync`.

use tagmatch_foundation::TokenSpan;

use crate::literal::Literal;

/// Something that happened during an evaluation run.
#[derive(Clone, Copy, Debug)]
pub enum EvalEvent<'a> {
    /// An evaluation run has started.
    RunStart {
        /// Number of rules in the set.
        rules: usize,
        /// Number of input tokens.
        tokens: usize,
        /// Whether rules run on a worker pool.
        parallel: bool,
    },

    /// An evaluation run has finished.
    RunEnd {
        /// Number of satisfied rules.
        matched: usize,
    },

    /// A rule's expression is about to be evaluated.
    RuleStart {
        /// The rule head.
        rule: &'a str,
    },

    /// A rule's evaluation finished.
    RuleFinished {
        /// The rule head.
        rule: &'a str,
        /// The composed span, if satisfied.
        span: Option<TokenSpan>,
    },

    /// A pattern literal was searched for in the input.
    LiteralEvaluated {
        /// The rule being evaluated.
        rule: &'a str,
        /// The literal.
        literal: &'a Literal,
        /// Its outcome.
        span: Option<TokenSpan>,
    },

    /// A literal's outcome was reused from the rule-local cache.
    LiteralCached {
        /// The rule being evaluated.
        rule: &'a str,
        /// The literal.
        literal: &'a Literal,
        /// The cached outcome.
        span: Option<TokenSpan>,
    },

    /// A reference literal was resolved.
    ReferenceResolved {
        /// The rule being evaluated.
        rule: &'a str,
        /// The referenced head.
        target: &'a str,
        /// The referenced rule's span, before negation.
        span: Option<TokenSpan>,
    },
}

impl EvalEvent<'_> {
    /// Returns a short name for the event type.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::RunStart { .. } => "run_start",
            Self::RunEnd { .. } => "run_end",
            Self::RuleStart { .. } => "rule_start",
            Self::RuleFinished { .. } => "rule_finished",
            Self::LiteralEvaluated { .. } => "literal_evaluated",
            Self::LiteralCached { .. } => "literal_cached",
            Self::ReferenceResolved { .. } => "reference_resolved",
        }
    }
}

/// Receives evaluation events.
pub trait EvalObserver: Sync {
    /// Called for every event, possibly from several threads at once.
    fn observe(&self, event: &EvalEvent<'_>);
}

/// Observer that ignores all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl EvalObserver for NoopObserver {
    #[inline]
    fn observe(&self, _event: &EvalEvent<'_>) {}
}

impl<T: EvalObserver + ?Sized> EvalObserver for &T {
    fn observe(&self, event: &EvalEvent<'_>) {
        (**self).observe(event);
    }
}
