//! Pattern literal integration tests
//!
//! Tests wildcard matching and negation through the public API.

use tagmatch_engine::{Literal, PatternMatcher, PatternToken, matches};
use tagmatch_foundation::{ErrorKind, PatternDefect, Token, TokenSpan};

fn tokens(text: &str) -> Vec<Token> {
    let mut offset = 0;
    text.split_whitespace()
        .map(|w| {
            let len = w.chars().count();
            let token = Token::new(w, offset, offset + len);
            offset += len + 1;
            token
        })
        .collect()
}

fn span(pattern: &[&str], text: &str) -> Option<TokenSpan> {
    let literal = Literal::words(pattern).unwrap();
    PatternMatcher::find_span(&literal, &tokens(text)).unwrap()
}

// =============================================================================
// Plain Patterns
// =============================================================================

#[test]
fn phrase_matches_contiguously() {
    let text = "The cat sat on the mat";
    assert_eq!(span(&["sat", "on"], text), Some(TokenSpan::new(2, 4)));
    assert_eq!(span(&["sat", "the"], text), None);
}

#[test]
fn words_are_case_sensitive() {
    assert_eq!(span(&["the"], "The cat"), None);
    assert_eq!(span(&["The"], "The cat"), Some(TokenSpan::new(0, 1)));
}

#[test]
fn pattern_longer_than_input() {
    assert_eq!(span(&["a", "b", "c"], "a b"), None);
    assert_eq!(span(&["a"], ""), None);
}

// =============================================================================
// Wildcards
// =============================================================================

#[test]
fn gap_between_words() {
    let text = "The cat sat on the mat";
    assert_eq!(span(&["cat", "*", "mat"], text), Some(TokenSpan::new(1, 6)));
    assert_eq!(span(&["cat", "+", "mat"], text), Some(TokenSpan::new(1, 6)));
    assert_eq!(span(&["cat", "?", "on"], text), Some(TokenSpan::new(1, 4)));
}

#[test]
fn wildcard_only_patterns() {
    assert_eq!(span(&["?"], "x y"), Some(TokenSpan::new(0, 1)));
    assert_eq!(span(&["*"], "x y"), Some(TokenSpan::new(0, 0)));
    assert_eq!(span(&["+"], "x y"), Some(TokenSpan::new(0, 1)));
    assert_eq!(span(&["?"], ""), None);
}

#[test]
fn mixed_wildcards_separated_by_words() {
    let text = "a x b y y c";
    assert_eq!(span(&["a", "?", "b", "*", "c"], text), Some(TokenSpan::new(0, 6)));
    assert_eq!(span(&["a", "+", "b", "+", "c"], text), Some(TokenSpan::new(0, 6)));
}

// =============================================================================
// Negation
// =============================================================================

#[test]
fn negated_absent_pattern_covers_input() {
    let literal = Literal::words(["C"]).unwrap().negate();
    let found = PatternMatcher::find_span(&literal, &tokens("A B")).unwrap();
    assert_eq!(found, Some(TokenSpan::new(0, 2)));
}

#[test]
fn negated_present_pattern_fails() {
    let literal = Literal::words(["cat", "*", "mat"]).unwrap().negate();
    assert!(!PatternMatcher::contains(&literal, &tokens("the cat on the mat")).unwrap());
}

#[test]
fn double_negation_restores_literal() {
    let literal = Literal::words(["x"]).unwrap();
    assert_eq!(literal.clone().negate().negate(), literal);
}

// =============================================================================
// Malformed Patterns
// =============================================================================

#[test]
fn adjacent_wildcards_are_rejected() {
    let err = Literal::words(["a", "*", "?", "b"]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedPattern {
            defect: PatternDefect::AdjacentWildcards { position: 2 },
            ..
        }
    ));
}

#[test]
fn empty_pattern_is_rejected() {
    let err = Literal::pattern(Vec::<PatternToken>::new()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MalformedPattern {
            defect: PatternDefect::Empty,
            ..
        }
    ));
}

#[test]
fn hand_built_malformed_literal_fails_at_match_time() {
    let mut literal = Literal::words(["a", "*", "b"]).unwrap();
    literal.tokens.remove(2);
    literal.tokens.push(PatternToken::OneOrMore);

    assert!(PatternMatcher::find_span(&literal, &tokens("a b")).is_err());
    assert!(matches(&tokens("a b"), &literal).is_err());
}

// =============================================================================
// Existence Checks
// =============================================================================

#[test]
fn matches_literal() {
    let toks = tokens("The cat sat");
    assert!(matches(&toks, &Literal::words(["cat"]).unwrap()).unwrap());
    assert!(!matches(&toks, &Literal::words(["dog"]).unwrap()).unwrap());
}

#[test]
fn standalone_reference_is_unsatisfied() {
    let toks = tokens("The cat sat");
    assert!(!matches(&toks, &Literal::reference("animal")).unwrap());
    assert!(matches(&toks, &Literal::reference("animal").negate()).unwrap());
}
