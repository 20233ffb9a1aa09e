//! Validated rule sets.
//!
//! Construction checks every invariant the evaluator relies on, so an
//! existing [`MatchRuleSet`] is always safe to evaluate:
//! - heads are unique
//! - every literal pattern is well formed
//! - every reference names a rule in the set, other than its own
//! - the reference graph has no cycles

use std::collections::HashMap;
use std::fmt;

use tagmatch_foundation::{Error, ErrorContext, Result};

use super::MatchRule;

/// DFS marker for cycle detection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// An immutable, validated collection of rules keyed by head.
///
/// Iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct MatchRuleSet {
    rules: Vec<MatchRule>,
    index: HashMap<String, usize>,
}

impl MatchRuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds and validates a rule set.
    ///
    /// # Errors
    /// Fails on the first violated invariant: a duplicate head, a malformed
    /// literal, a reference to an undefined rule, a direct self-reference,
    /// or a reference cycle.
    pub fn new(rules: impl IntoIterator<Item = MatchRule>) -> Result<Self> {
        let mut set = Self::default();
        for rule in rules {
            if set.index.contains_key(&rule.head) {
                return Err(Error::duplicate_rule(rule.head));
            }
            set.index.insert(rule.head.clone(), set.rules.len());
            set.rules.push(rule);
        }

        set.check_literals()?;
        set.check_cycles()?;
        Ok(set)
    }

    fn check_literals(&self) -> Result<()> {
        for rule in &self.rules {
            for ((d, l), literal) in rule.literals() {
                let context = || ErrorContext::new().with_rule(&rule.head).with_position(d, l);

                literal.validate().map_err(|e| e.with_context(context()))?;

                let Some(target) = literal.target() else {
                    continue;
                };
                if !self.index.contains_key(target) {
                    return Err(Error::undefined_reference(&rule.head, target).with_context(context()));
                }
                if target == rule.head {
                    return Err(Error::self_reference(&rule.head).with_context(context()));
                }
            }
        }
        Ok(())
    }

    fn check_cycles(&self) -> Result<()> {
        let mut marks = vec![Mark::Unvisited; self.rules.len()];
        let mut path = Vec::new();
        for i in 0..self.rules.len() {
            self.visit(i, &mut marks, &mut path, &mut |_| {})?;
        }
        Ok(())
    }

    /// Depth-first walk over references, calling `done` in post-order.
    fn visit<'a>(
        &'a self,
        i: usize,
        marks: &mut [Mark],
        path: &mut Vec<&'a str>,
        done: &mut dyn FnMut(&'a MatchRule),
    ) -> Result<()> {
        match marks[i] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let head = self.rules[i].head.as_str();
                let from = path.iter().position(|h| *h == head).unwrap_or(0);
                let mut cycle: Vec<String> = path[from..].iter().map(|h| (*h).to_string()).collect();
                cycle.push(head.to_string());
                return Err(Error::cyclic_reference(cycle));
            }
            Mark::Unvisited => {}
        }

        marks[i] = Mark::InProgress;
        let rule = &self.rules[i];
        path.push(&rule.head);
        for target in rule.references() {
            if let Some(&j) = self.index.get(target) {
                self.visit(j, marks, path, done)?;
            }
        }
        path.pop();
        marks[i] = Mark::Done;
        done(rule);
        Ok(())
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up a rule by head.
    #[must_use]
    pub fn get(&self, head: &str) -> Option<&MatchRule> {
        self.index.get(head).map(|&i| &self.rules[i])
    }

    /// Returns true if a rule with this head exists.
    #[must_use]
    pub fn contains(&self, head: &str) -> bool {
        self.index.contains_key(head)
    }

    /// Iterates rules in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRule> {
        self.rules.iter()
    }

    /// The rules as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[MatchRule] {
        &self.rules
    }

    /// Iterates heads in insertion order.
    pub fn heads(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.head.as_str())
    }

    /// Heads directly referenced by the rule `head`.
    #[must_use]
    pub fn dependencies(&self, head: &str) -> Vec<&str> {
        self.get(head).map(MatchRule::references).unwrap_or_default()
    }

    /// All rules ordered so that every rule comes after the rules it
    /// references. Ties keep insertion order.
    #[must_use]
    pub fn evaluation_order(&self) -> Vec<&MatchRule> {
        let mut order = Vec::with_capacity(self.rules.len());
        let mut marks = vec![Mark::Unvisited; self.rules.len()];
        let mut path = Vec::new();
        for i in 0..self.rules.len() {
            let walked = self.visit(i, &mut marks, &mut path, &mut |rule| order.push(rule));
            debug_assert!(walked.is_ok(), "rule sets are acyclic by construction");
        }
        order
    }
}

impl TryFrom<Vec<MatchRule>> for MatchRuleSet {
    type Error = Error;

    fn try_from(rules: Vec<MatchRule>) -> Result<Self> {
        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a MatchRuleSet {
    type Item = &'a MatchRule;
    type IntoIter = std::slice::Iter<'a, MatchRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for MatchRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
