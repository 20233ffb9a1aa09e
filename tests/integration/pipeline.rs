//! Text-to-markup pipeline tests
//!
//! Tokenize, evaluate a rule set, and highlight the source text.

use tagmatch::engine::{
    EvalConfig, Highlighter, Literal, MatchRule, MatchRuleSet, PatternToken, RuleEvaluator,
};
use tagmatch::foundation::{ErrorKind, Token};

fn tokens(text: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.chars().chain(std::iter::once(' ')).enumerate() {
        match (c.is_alphanumeric(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                let word: String = text.chars().skip(s).take(i - s).collect();
                out.push(Token::new(word.to_lowercase(), s, i));
                start = None;
            }
            _ => {}
        }
    }
    out
}

fn words(w: &[&str]) -> Literal {
    Literal::words(w).unwrap()
}

fn rule_set() -> MatchRuleSet {
    MatchRuleSet::new([
        MatchRule::new("animal", vec![vec![words(&["cat"]), words(&["dog"]), words(&["bird"])]]),
        MatchRule::new("place", vec![vec![words(&["the", "?", "garden"]), words(&["park"])]]),
        MatchRule::new(
            "outing",
            vec![
                vec![Literal::reference("animal")],
                vec![words(&["went", "*", "to"])],
                vec![Literal::reference("place")],
            ],
        ),
        MatchRule::new("indoors", vec![vec![Literal::reference("place").negate()]]),
    ])
    .unwrap()
}

#[test]
fn end_to_end_markup() {
    let text = "Our dog went to the park.";
    let toks = tokens(text);
    let results = RuleEvaluator::new().evaluate(&rule_set(), &toks).unwrap();

    assert_eq!(results.labels().collect::<Vec<_>>(), vec!["animal", "place", "outing"]);
    let outing = results.get("outing").unwrap();
    assert_eq!((outing.char_start, outing.char_end), (4, 24));

    assert_eq!(
        Highlighter::new().highlight(text, &results),
        "Our <span class=\"match animal\"><span class=\"match outing\">dog</span> went to the \
         <span class=\"match place\">park</span></span>."
    );
}

#[test]
fn modes_agree_on_text() {
    let text = "The bird sang in the old garden, then went home to the park";
    let toks = tokens(text);
    let set = rule_set();

    let sequential = RuleEvaluator::new().evaluate(&set, &toks).unwrap();
    let parallel = RuleEvaluator::new()
        .with_config(EvalConfig::parallel())
        .run(&set, &toks)
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential.get("place").unwrap().span().len(), 3);
    assert!(!sequential.contains("indoors"));
}

#[test]
fn rule_set_errors_carry_location() {
    let bad = Literal {
        tokens: vec![PatternToken::word("a"), PatternToken::ZeroOrMore, PatternToken::OneOrMore],
        ..words(&["a"])
    };
    let err = MatchRuleSet::new([MatchRule::new("broken", vec![vec![words(&["x"])], vec![bad]])])
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::MalformedPattern { .. }));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.rule.as_deref(), Some("broken"));
    assert_eq!((ctx.disjunction, ctx.literal), (Some(1), Some(0)));
}
