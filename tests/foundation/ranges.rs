//! Integration tests for tokens, spans and match ranges

use tagmatch_foundation::{MatchRange, Token, TokenSpan};

fn sentence() -> Vec<Token> {
    vec![
        Token::new("The", 0, 3),
        Token::new("cat", 4, 7),
        Token::new("sat", 8, 11),
        Token::new("on", 12, 14),
        Token::new("the", 15, 18),
        Token::new("mat", 19, 22),
    ]
}

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn tokens_compare_by_word() {
    let tokens = sentence();
    assert_eq!(tokens[0].word(), "The");
    assert_ne!(tokens[0], tokens[4]);
    assert_eq!(tokens[1], Token::new("cat", 100, 103));
    assert_eq!(tokens[1].to_string(), "cat");
}

#[test]
fn token_offsets_are_preserved() {
    let token = Token::new(String::from("mat"), 19, 22);
    assert_eq!((token.char_start(), token.char_end()), (19, 22));
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn span_basics() {
    let span = TokenSpan::new(1, 6);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert_eq!(span.to_string(), "[1, 6)");
    assert_eq!(TokenSpan::whole(0), TokenSpan::new(0, 0));
    assert!(TokenSpan::whole(0).is_empty());
}

// =============================================================================
// Match Ranges
// =============================================================================

#[test]
fn range_takes_char_offsets_from_edge_tokens() {
    let range = MatchRange::from_span("cat_mat", TokenSpan::new(1, 6), &sentence());
    assert_eq!(range.label, "cat_mat");
    assert_eq!((range.token_start, range.token_end), (1, 6));
    assert_eq!((range.char_start, range.char_end), (4, 22));
    assert_eq!(range.span(), TokenSpan::new(1, 6));
}

#[test]
fn range_over_empty_input() {
    let range = MatchRange::from_span("vacuous", TokenSpan::whole(0), &[]);
    assert_eq!((range.char_start, range.char_end), (0, 0));
}

#[test]
fn range_display() {
    let range = MatchRange::from_span("R", TokenSpan::new(1, 2), &sentence());
    assert_eq!(range.to_string(), "R tokens [1, 2) chars [4, 7)");
}
