//! Rule evaluation and pattern matching for tagmatch.
//!
//! This crate provides:
//! - [`Literal`] - Token patterns with wildcards, negation, and rule references
//! - [`MatchRule`] / [`MatchRuleSet`] - CNF rules and validated rule sets
//! - [`PatternMatcher`] - Wildcard-aware search over a token sequence
//! - [`RuleEvaluator`] - CNF evaluation, sequential or parallel
//! - [`Highlighter`] - Renders match results back onto the source text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod eval;
pub mod highlight;
pub mod literal;
pub mod observe;
pub mod pattern;
pub mod rule;

pub use config::{EvalConfig, EvalMode};
pub use eval::{MatchResults, MatchTarget, RuleEvaluator, matches};
pub use highlight::Highlighter;
pub use literal::{Literal, LiteralKind, PatternToken};
pub use observe::{EvalEvent, EvalObserver, NoopObserver};
pub use pattern::PatternMatcher;
pub use rule::{MatchRule, MatchRuleSet};
