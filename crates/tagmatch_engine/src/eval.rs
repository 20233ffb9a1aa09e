//! CNF rule evaluation.
//!
//! Every rule head owns a compute-once cell for the duration of a run. A
//! rule reached through a reference is evaluated at most once, whether the
//! run is sequential or parallel, and concurrent requests for the same rule
//! wait for the first computation instead of repeating it. The rule set is
//! acyclic by construction, so no cell ever waits on itself.

use std::collections::HashMap;
use std::sync::OnceLock;

use rayon::prelude::*;
use tagmatch_foundation::{Error, ErrorContext, MatchRange, PatternDefect, Result, Token, TokenSpan};

use crate::config::{EvalConfig, EvalMode};
use crate::literal::Literal;
use crate::observe::{EvalEvent, EvalObserver, NoopObserver};
use crate::pattern::PatternMatcher;
use crate::rule::{MatchRule, MatchRuleSet};

static NOOP: NoopObserver = NoopObserver;

type Outcome = Result<Option<TokenSpan>>;

// =============================================================================
// Match Results
// =============================================================================

/// The satisfied rules of one evaluation run, keyed by head.
///
/// Iteration follows rule-set order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResults {
    ranges: Vec<MatchRange>,
    index: HashMap<String, usize>,
}

impl MatchResults {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, range: MatchRange) {
        self.index.insert(range.label.clone(), self.ranges.len());
        self.ranges.push(range);
    }

    /// The match range of the rule `head`, if it was satisfied.
    #[must_use]
    pub fn get(&self, head: &str) -> Option<&MatchRange> {
        self.index.get(head).map(|&i| &self.ranges[i])
    }

    /// Returns true if the rule `head` was satisfied.
    #[must_use]
    pub fn contains(&self, head: &str) -> bool {
        self.index.contains_key(head)
    }

    /// Number of satisfied rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if no rule was satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterates match ranges.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRange> {
        self.ranges.iter()
    }

    /// Labels of the satisfied rules.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ranges.iter().map(|r| r.label.as_str())
    }

    /// Converts into a plain map from head to range.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, MatchRange> {
        self.ranges.into_iter().map(|r| (r.label.clone(), r)).collect()
    }
}

impl<'a> IntoIterator for &'a MatchResults {
    type Item = &'a MatchRange;
    type IntoIter = std::slice::Iter<'a, MatchRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

// =============================================================================
// Existence Check
// =============================================================================

/// Something that can be checked against a token sequence on its own.
#[derive(Clone, Copy, Debug)]
pub enum MatchTarget<'a> {
    /// A single literal.
    Literal(&'a Literal),
    /// A standalone rule.
    Rule(&'a MatchRule),
}

impl<'a> From<&'a Literal> for MatchTarget<'a> {
    fn from(literal: &'a Literal) -> Self {
        Self::Literal(literal)
    }
}

impl<'a> From<&'a MatchRule> for MatchTarget<'a> {
    fn from(rule: &'a MatchRule) -> Self {
        Self::Rule(rule)
    }
}

/// Returns true if a literal or a standalone rule is satisfied by `tokens`.
///
/// Without a rule set there is nothing to resolve references against, so a
/// reference literal is treated as unsatisfied (and its negation as
/// satisfied).
///
/// # Errors
/// Returns a malformed pattern error for an unmatchable literal.
pub fn matches<'a>(tokens: &[Token], target: impl Into<MatchTarget<'a>>) -> Result<bool> {
    match target.into() {
        MatchTarget::Literal(literal) if literal.is_reference() => Ok(literal.negated),
        MatchTarget::Literal(literal) => PatternMatcher::contains(literal, tokens),
        MatchTarget::Rule(rule) => {
            let run = Run::new(None, tokens, &NOOP);
            Ok(run.find_span(rule, &mut Vec::new())?.is_some())
        }
    }
}

// =============================================================================
// Rule Evaluator
// =============================================================================

/// Evaluates rule sets against token sequences.
pub struct RuleEvaluator<'o> {
    config: EvalConfig,
    observer: &'o dyn EvalObserver,
}

impl Default for RuleEvaluator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEvaluator<'static> {
    /// Creates a sequential evaluator that reports to no one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EvalConfig::default(),
            observer: &NOOP,
        }
    }
}

impl<'o> RuleEvaluator<'o> {
    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Reports evaluation events to `observer`.
    #[must_use]
    pub fn with_observer<'p>(self, observer: &'p dyn EvalObserver) -> RuleEvaluator<'p> {
        RuleEvaluator {
            config: self.config,
            observer,
        }
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates using the configured mode.
    ///
    /// # Errors
    /// See [`RuleEvaluator::evaluate`].
    pub fn run(&self, rules: &MatchRuleSet, tokens: &[Token]) -> Result<MatchResults> {
        match self.config.mode {
            EvalMode::Sequential => self.evaluate(rules, tokens),
            EvalMode::Parallel => self.evaluate_parallel(rules, tokens),
        }
    }

    /// Evaluates every rule in order on the calling thread.
    ///
    /// # Errors
    /// Returns the first error raised by a rule: a malformed pattern or a
    /// reference cycle, neither of which survives rule-set construction.
    pub fn evaluate(&self, rules: &MatchRuleSet, tokens: &[Token]) -> Result<MatchResults> {
        self.observer.observe(&EvalEvent::RunStart {
            rules: rules.len(),
            tokens: tokens.len(),
            parallel: false,
        });

        let run = Run::new(Some(rules), tokens, self.observer);
        for rule in rules {
            run.resolve(rule, &mut Vec::new())?;
        }
        self.finish(&run, rules)
    }

    /// Evaluates rules concurrently on a rayon pool.
    ///
    /// Produces the same results as [`RuleEvaluator::evaluate`].
    ///
    /// # Errors
    /// Returns the error of the first failing rule in rule-set order, or an
    /// internal error if a dedicated pool cannot be built.
    pub fn evaluate_parallel(&self, rules: &MatchRuleSet, tokens: &[Token]) -> Result<MatchResults> {
        self.observer.observe(&EvalEvent::RunStart {
            rules: rules.len(),
            tokens: tokens.len(),
            parallel: true,
        });

        let run = Run::new(Some(rules), tokens, self.observer);
        let work = || {
            rules.as_slice().par_iter().for_each(|rule| {
                // failures stay in the cell and surface in `finish`
                let _ = run.resolve(rule, &mut Vec::new());
            });
        };

        match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::internal(format!("cannot build worker pool: {e}")))?
                .install(work),
            None => work(),
        }

        self.finish(&run, rules)
    }

    /// Evaluates a single rule of `rules`, resolving its references.
    ///
    /// Returns `Ok(None)` if the rule is unsatisfied or not in the set. The
    /// span starts where the first clause matched; later clauses only move
    /// its end, and a clause ending before that start leaves it unchanged.
    ///
    /// # Errors
    /// Same as [`RuleEvaluator::evaluate`].
    pub fn evaluate_rule(
        &self,
        rules: &MatchRuleSet,
        head: &str,
        tokens: &[Token],
    ) -> Result<Option<MatchRange>> {
        let Some(rule) = rules.get(head) else {
            return Ok(None);
        };
        let run = Run::new(Some(rules), tokens, self.observer);
        let span = run.resolve(rule, &mut Vec::new())?;
        Ok(span.map(|span| MatchRange::from_span(head, span, tokens)))
    }

    fn finish(&self, run: &Run<'_>, rules: &MatchRuleSet) -> Result<MatchResults> {
        let mut results = MatchResults::new();
        for rule in rules {
            let Some(outcome) = run.cells.get(rule.head.as_str()).and_then(OnceLock::get) else {
                continue;
            };
            if let Some(span) = outcome.clone()? {
                results.insert(MatchRange::from_span(&rule.head, span, run.tokens));
            }
        }

        self.observer.observe(&EvalEvent::RunEnd {
            matched: results.len(),
        });
        Ok(results)
    }
}

// =============================================================================
// Run State
// =============================================================================

/// State of one evaluation over one token sequence.
struct Run<'r> {
    rules: Option<&'r MatchRuleSet>,
    tokens: &'r [Token],
    cells: HashMap<&'r str, OnceLock<Outcome>>,
    observer: &'r dyn EvalObserver,
}

impl<'r> Run<'r> {
    fn new(
        rules: Option<&'r MatchRuleSet>,
        tokens: &'r [Token],
        observer: &'r dyn EvalObserver,
    ) -> Self {
        let cells = rules
            .map(|rules| rules.heads().map(|h| (h, OnceLock::new())).collect())
            .unwrap_or_default();
        Self {
            rules,
            tokens,
            cells,
            observer,
        }
    }

    /// The rule's span, computed at most once per run.
    fn resolve(&self, rule: &'r MatchRule, stack: &mut Vec<&'r str>) -> Outcome {
        match self.cells.get(rule.head.as_str()) {
            Some(cell) => cell.get_or_init(|| self.find_span(rule, stack)).clone(),
            None => self.find_span(rule, stack),
        }
    }

    fn find_span(&self, rule: &'r MatchRule, stack: &mut Vec<&'r str>) -> Outcome {
        let head = rule.head.as_str();
        self.observer.observe(&EvalEvent::RuleStart { rule: head });

        stack.push(head);
        let outcome = self.compose(rule, stack);
        stack.pop();

        if let Ok(span) = &outcome {
            self.observer.observe(&EvalEvent::RuleFinished { rule: head, span: *span });
        }
        outcome
    }

    /// AND over disjunctions, OR within each, with a rule-local literal cache.
    ///
    /// The first satisfied clause fixes the start. A later clause extends the
    /// end only if it ends after that start, so the span is never inverted.
    fn compose(&self, rule: &'r MatchRule, stack: &mut Vec<&'r str>) -> Outcome {
        if rule.expression.is_empty() {
            return Ok(Some(TokenSpan::whole(self.tokens.len())));
        }

        let head = rule.head.as_str();
        let mut cache: HashMap<&'r Literal, Option<TokenSpan>> = HashMap::new();
        let mut accumulated: Option<TokenSpan> = None;

        for (d, disjunction) in rule.expression.iter().enumerate() {
            let mut satisfied = None;

            for (l, literal) in disjunction.iter().enumerate() {
                let span = if let Some(&cached) = cache.get(literal) {
                    self.observer.observe(&EvalEvent::LiteralCached {
                        rule: head,
                        literal,
                        span: cached,
                    });
                    cached
                } else {
                    let span = self
                        .literal_span(head, literal, stack)
                        .map_err(|e| locate(e, head, d, l))?;
                    cache.insert(literal, span);
                    span
                };

                if span.is_some() {
                    satisfied = span;
                    break;
                }
            }

            let Some(span) = satisfied else {
                return Ok(None);
            };

            // the first satisfied clause fixes the start; later ones only move the end
            accumulated = Some(match accumulated {
                None => span,
                Some(acc) if span.end > acc.start => TokenSpan::new(acc.start, span.end),
                Some(acc) => acc,
            });
        }

        Ok(accumulated)
    }

    fn literal_span(&self, head: &'r str, literal: &'r Literal, stack: &mut Vec<&'r str>) -> Outcome {
        if !literal.is_reference() {
            let span = PatternMatcher::find_span(literal, self.tokens)?;
            self.observer.observe(&EvalEvent::LiteralEvaluated {
                rule: head,
                literal,
                span,
            });
            return Ok(span);
        }

        let found = self.reference_span(head, literal, stack)?;
        Ok(match (found, literal.negated) {
            (Some(span), false) => Some(span),
            (None, true) => Some(TokenSpan::whole(self.tokens.len())),
            (Some(_), true) | (None, false) => None,
        })
    }

    fn reference_span(&self, head: &'r str, literal: &'r Literal, stack: &mut Vec<&'r str>) -> Outcome {
        let Some(target) = literal.target() else {
            return Err(Error::malformed_pattern(literal.to_string(), PatternDefect::BadReference));
        };

        let span = match self.rules.and_then(|rules| rules.get(target)) {
            Some(target_rule) => {
                if let Some(from) = stack.iter().position(|h| *h == target) {
                    let mut path: Vec<String> = stack[from..].iter().map(|h| (*h).to_string()).collect();
                    path.push(target.to_string());
                    return Err(Error::cyclic_reference(path));
                }
                self.resolve(target_rule, stack)?
            }
            None => None,
        };

        self.observer.observe(&EvalEvent::ReferenceResolved {
            rule: head,
            target,
            span,
        });
        Ok(span)
    }
}

/// Attaches the rule position to an error that has no context yet.
fn locate(error: Error, head: &str, disjunction: usize, literal: usize) -> Error {
    if error.context.is_some() {
        return error;
    }
    error.with_context(
        ErrorContext::new()
            .with_rule(head)
            .with_position(disjunction, literal),
    )
}

// =============================================================================
// Tests
// =============================================================================
