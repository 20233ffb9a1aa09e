//! Tracer and observability configuration tests

use tagmatch::debug::{ObservabilityConfig, TraceEvent, TraceVerbosity, Tracer, TracerConfig};
use tagmatch::engine::{EvalConfig, Literal, MatchRule, MatchRuleSet, RuleEvaluator};
use tagmatch::foundation::{Token, TokenSpan};

fn tokens(words: &[&str]) -> Vec<Token> {
    let mut offset = 0;
    words
        .iter()
        .map(|w| {
            let len = w.chars().count();
            let token = Token::new(*w, offset, offset + len);
            offset += len + 1;
            token
        })
        .collect()
}

fn rules() -> MatchRuleSet {
    MatchRuleSet::new([
        MatchRule::new("animal", vec![vec![Literal::words(["cat"]).unwrap()]]),
        MatchRule::new(
            "pet",
            vec![
                vec![Literal::reference("animal")],
                vec![Literal::words(["cat"]).unwrap()],
            ],
        ),
    ])
    .unwrap()
}

fn quiet(config: ObservabilityConfig) -> Tracer {
    Tracer::new(config.with_trace_to_stderr(false).tracer_config())
}

#[test]
fn full_verbosity_records_literal_events() {
    let tracer = quiet(ObservabilityConfig::debug());
    RuleEvaluator::new()
        .with_observer(&tracer)
        .evaluate(&rules(), &tokens(&["the", "cat"]))
        .unwrap();

    let buffer = tracer.buffer();
    assert_eq!(buffer.by_event_type("reference_resolved").len(), 1);
    assert_eq!(buffer.by_event_type("literal_evaluated").len(), 2);
    assert_eq!(buffer.by_event_type("literal_cached").len(), 0);

    let resolved = &buffer.by_event_type("reference_resolved")[0].event;
    assert_eq!(
        *resolved,
        TraceEvent::ReferenceResolved {
            rule: "pet".to_string(),
            target: "animal".to_string(),
            span: Some(TokenSpan::new(1, 2)),
        }
    );
}

#[test]
fn minimal_verbosity_records_run_boundaries() {
    let tracer = quiet(ObservabilityConfig::enabled().with_verbosity(TraceVerbosity::Minimal));
    let evaluator = RuleEvaluator::new().with_observer(&tracer);
    evaluator.evaluate(&rules(), &tokens(&["a", "cat"])).unwrap();
    evaluator.evaluate(&rules(), &tokens(&["a", "dog"])).unwrap();

    let stats = tracer.stats();
    assert_eq!(stats.record_count, 4);
    assert_eq!(stats.run_count, 2);
    assert_eq!(
        tracer.run_records(2).last().map(|r| r.event.clone()),
        Some(TraceEvent::RunEnd { matched: 0 })
    );
}

#[test]
fn disabled_config_records_nothing() {
    let tracer = quiet(ObservabilityConfig::default());
    RuleEvaluator::new()
        .with_config(EvalConfig::parallel())
        .with_observer(&tracer)
        .run(&rules(), &tokens(&["cat"]))
        .unwrap();
    assert!(tracer.buffer().is_empty());
}

#[test]
fn json_trace_of_a_run() {
    let tracer = Tracer::new(TracerConfig::new().enabled().json());
    RuleEvaluator::new()
        .with_observer(&tracer)
        .evaluate(&rules(), &tokens(&["cat"]))
        .unwrap();

    let json = tracer.format_last_run();
    assert!(json.starts_with("[{\"id\":0,\"run\":1"));
    assert!(json.contains("\"type\":\"rule_finished\",\"rule\":\"pet\",\"span\":{\"start\":0,\"end\":1}"));
    assert!(json.ends_with("\"type\":\"run_end\",\"matched\":2}]"));
}

#[test]
fn small_buffer_keeps_latest_run() {
    let tracer = Tracer::new(TracerConfig::new().enabled().with_buffer_size(3));
    let evaluator = RuleEvaluator::new().with_observer(&tracer);
    for _ in 0..3 {
        evaluator.evaluate(&rules(), &tokens(&["cat"])).unwrap();
    }

    let buffer = tracer.buffer();
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.runs(), vec![3]);
    assert_eq!(buffer.recent(1)[0].event, TraceEvent::RunEnd { matched: 2 });
}
