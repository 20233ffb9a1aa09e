//! Match rules in conjunctive normal form.
//!
//! A rule's expression is an AND of ORs: every disjunction must contain at
//! least one satisfied literal. An empty expression is always satisfied.

pub mod set;

pub use set::MatchRuleSet;

use std::fmt;

use crate::literal::Literal;

// =============================================================================
// Match Rule
// =============================================================================

/// A named CNF rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRule {
    /// Identifying label; also used as the label of its match range.
    pub head: String,
    /// Disjunctions, all of which must hold.
    pub expression: Vec<Vec<Literal>>,
}

impl MatchRule {
    /// Creates a rule with the given expression.
    #[must_use]
    pub fn new(head: impl Into<String>, expression: Vec<Vec<Literal>>) -> Self {
        Self {
            head: head.into(),
            expression,
        }
    }

    /// Creates a rule with an empty expression, matching any input.
    #[must_use]
    pub fn always(head: impl Into<String>) -> Self {
        Self::new(head, Vec::new())
    }

    /// Appends a disjunction.
    #[must_use]
    pub fn with_clause(mut self, disjunction: Vec<Literal>) -> Self {
        self.expression.push(disjunction);
        self
    }

    /// Returns true if the expression has no disjunctions.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.expression.is_empty()
    }

    /// Iterates all literals with their (disjunction, literal) position.
    pub fn literals(&self) -> impl Iterator<Item = ((usize, usize), &Literal)> {
        self.expression.iter().enumerate().flat_map(|(d, disjunction)| {
            disjunction
                .iter()
                .enumerate()
                .map(move |(l, literal)| ((d, l), literal))
        })
    }

    /// Heads referenced directly by this rule, in expression order.
    ///
    /// A head referenced more than once is listed once.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut heads: Vec<&str> = Vec::new();
        for (_, literal) in self.literals() {
            if let Some(target) = literal.target() {
                if !heads.contains(&target) {
                    heads.push(target);
                }
            }
        }
        heads
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-", self.head)?;
        for (d, disjunction) in self.expression.iter().enumerate() {
            f.write_str(if d == 0 { " " } else { " & " })?;
            for (l, literal) in disjunction.iter().enumerate() {
                if l > 0 {
                    f.write_str(" | ")?;
                }
                write!(f, "{literal}")?;
            }
        }
        Ok(())
    }
}
