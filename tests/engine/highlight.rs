//! Highlighting integration tests

use tagmatch_engine::{Highlighter, Literal, MatchResults, MatchRule, MatchRuleSet, RuleEvaluator};
use tagmatch_foundation::Token;

fn tokens(text: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.chars().chain(std::iter::once(' ')).enumerate() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                let word: String = text.chars().skip(s).take(i - s).collect();
                out.push(Token::new(word, s, i));
                start = None;
            }
            _ => {}
        }
    }
    out
}

fn evaluate(text: &str, rules: Vec<MatchRule>) -> MatchResults {
    let set = MatchRuleSet::new(rules).unwrap();
    RuleEvaluator::new().evaluate(&set, &tokens(text)).unwrap()
}

fn rule(head: &str, w: &[&str]) -> MatchRule {
    MatchRule::new(head, vec![vec![Literal::words(w).unwrap()]])
}

#[test]
fn adjacent_ranges_close_before_opening() {
    let text = "cat dog";
    let results = evaluate(text, vec![rule("a", &["cat"]), rule("b", &["dog"])]);
    assert_eq!(
        Highlighter::new().highlight(text, &results),
        "<span class=\"match a\">cat</span> <span class=\"match b\">dog</span>"
    );
}

#[test]
fn wildcard_range_covers_gap() {
    let text = "The cat sat on the mat";
    let results = evaluate(text, vec![rule("R", &["cat", "*", "mat"])]);
    assert_eq!(
        Highlighter::new().highlight(text, &results),
        "The <span class=\"match R\">cat sat on the mat</span>"
    );
}

#[test]
fn multiline_text() {
    let text = "a cat\nand a dog";
    let results = evaluate(text, vec![rule("pair", &["cat", "+", "dog"])]);
    assert_eq!(
        Highlighter::new().highlight(text, &results),
        "a <span class=\"match pair\">cat<br/>\nand a dog</span>"
    );
}

#[test]
fn empty_ranges_are_skipped() {
    let results = evaluate("", vec![MatchRule::always("any")]);
    assert_eq!(results.len(), 1);
    assert_eq!(Highlighter::new().highlight("", &results), "");
}

#[test]
fn non_ascii_text_uses_char_offsets() {
    let text = "le café noir";
    let results = evaluate(text, vec![rule("drink", &["café"])]);
    assert_eq!(
        Highlighter::new().with_class("hl").highlight(text, &results),
        "le <span class=\"hl drink\">café</span> noir"
    );
}
