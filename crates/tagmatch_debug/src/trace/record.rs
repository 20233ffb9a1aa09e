//! Trace event and record types.
//!
//! [`TraceEvent`] is the owned counterpart of
//! [`EvalEvent`](tagmatch_engine::EvalEvent): borrowed rule heads and
//! literals are copied out so records outlive the run that produced them.

use tagmatch_engine::EvalEvent;
use tagmatch_foundation::TokenSpan;

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while evaluating a rule set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// An evaluation run has started.
    RunStart {
        /// Number of rules in the set.
        rules: usize,
        /// Number of input tokens.
        tokens: usize,
        /// Whether rules ran on a worker pool.
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
        rule: String,
    },

    /// A rule's evaluation finished.
    RuleFinished {
        /// The rule head.
        rule: String,
        /// The composed span, if satisfied.
        span: Option<TokenSpan>,
    },

    /// A pattern literal was searched for.
    LiteralEvaluated {
        /// The rule being evaluated.
        rule: String,
        /// The literal, rendered in rule syntax.
        literal: String,
        /// Its outcome.
        span: Option<TokenSpan>,
    },

    /// A literal outcome was reused from the rule-local cache.
    LiteralCached {
        /// The rule being evaluated.
        rule: String,
        /// The literal, rendered in rule syntax.
        literal: String,
        /// The cached outcome.
        span: Option<TokenSpan>,
    },

    /// A reference literal was resolved.
    ReferenceResolved {
        /// The rule being evaluated.
        rule: String,
        /// The referenced head.
        target: String,
        /// The referenced rule's span, before negation.
        span: Option<TokenSpan>,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
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

    /// Returns true if this is a run boundary event.
    #[must_use]
    pub fn is_run_boundary(&self) -> bool {
        matches!(self, Self::RunStart { .. } | Self::RunEnd { .. })
    }

    /// Returns true if this is a rule boundary event.
    #[must_use]
    pub fn is_rule_event(&self) -> bool {
        matches!(self, Self::RuleStart { .. } | Self::RuleFinished { .. })
    }

    /// Returns true if this event describes a single literal.
    #[must_use]
    pub fn is_literal_event(&self) -> bool {
        matches!(
            self,
            Self::LiteralEvaluated { .. }
                | Self::LiteralCached { .. }
                | Self::ReferenceResolved { .. }
        )
    }

    /// The rule head this event belongs to, if any.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::RunStart { .. } | Self::RunEnd { .. } => None,
            Self::RuleStart { rule }
            | Self::RuleFinished { rule, .. }
            | Self::LiteralEvaluated { rule, .. }
            | Self::LiteralCached { rule, .. }
            | Self::ReferenceResolved { rule, .. } => Some(rule),
        }
    }
}

impl From<&EvalEvent<'_>> for TraceEvent {
    fn from(event: &EvalEvent<'_>) -> Self {
        match *event {
            EvalEvent::RunStart {
                rules,
                tokens,
                parallel,
            } => Self::RunStart {
                rules,
                tokens,
                parallel,
            },
            EvalEvent::RunEnd { matched } => Self::RunEnd { matched },
            EvalEvent::RuleStart { rule } => Self::RuleStart {
                rule: rule.to_string(),
            },
            EvalEvent::RuleFinished { rule, span } => Self::RuleFinished {
                rule: rule.to_string(),
                span,
            },
            EvalEvent::LiteralEvaluated {
                rule,
                literal,
                span,
            } => Self::LiteralEvaluated {
                rule: rule.to_string(),
                literal: literal.to_string(),
                span,
            },
            EvalEvent::LiteralCached {
                rule,
                literal,
                span,
            } => Self::LiteralCached {
                rule: rule.to_string(),
                literal: literal.to_string(),
                span,
            },
            EvalEvent::ReferenceResolved { rule, target, span } => Self::ReferenceResolved {
                rule: rule.to_string(),
                target: target.to_string(),
                span,
            },
        }
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the tracer's lifetime.
    pub id: u64,
    /// The evaluation run this event belongs to.
    pub run: u64,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, run: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            run,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
