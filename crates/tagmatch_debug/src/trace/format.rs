//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;

use tagmatch_foundation::TokenSpan;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    fn format_span(span: Option<TokenSpan>) -> String {
        span.map_or_else(|| "no match".to_string(), |s| s.to_string())
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "R{:04} ", record.run);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let event_str = match &record.event {
            TraceEvent::RunStart {
                rules,
                tokens,
                parallel,
            } => {
                let mode = if *parallel { "parallel" } else { "sequential" };
                format!(
                    "=== RUN {} START ({rules} rules, {tokens} tokens, {mode}) ===",
                    record.run
                )
            }
            TraceEvent::RunEnd { matched } => {
                format!("=== RUN {} END ({matched} matched) ===", record.run)
            }
            TraceEvent::RuleStart { rule } => format!("  >> {rule}"),
            TraceEvent::RuleFinished { rule, span } => {
                format!("  << {rule} {}", Self::format_span(*span))
            }
            TraceEvent::LiteralEvaluated {
                rule,
                literal,
                span,
            } => format!("    LITERAL {rule}: {literal} -> {}", Self::format_span(*span)),
            TraceEvent::LiteralCached {
                rule,
                literal,
                span,
            } => format!("    CACHED {rule}: {literal} -> {}", Self::format_span(*span)),
            TraceEvent::ReferenceResolved { rule, target, span } => {
                format!("    REF {rule}: #{target} -> {}", Self::format_span(*span))
            }
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print record lists.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }

    fn format_span(span: Option<TokenSpan>) -> String {
        span.map_or_else(
            || "null".to_string(),
            |s| format!("{{\"start\":{},\"end\":{}}}", s.start, s.end),
        )
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let esc = Self::escape_string;

        let event_data = match &record.event {
            TraceEvent::RunStart {
                rules,
                tokens,
                parallel,
            } => format!("\"rules\":{rules},\"tokens\":{tokens},\"parallel\":{parallel}"),
            TraceEvent::RunEnd { matched } => format!("\"matched\":{matched}"),
            TraceEvent::RuleStart { rule } => format!("\"rule\":\"{}\"", esc(rule)),
            TraceEvent::RuleFinished { rule, span } => format!(
                "\"rule\":\"{}\",\"span\":{}",
                esc(rule),
                Self::format_span(*span)
            ),
            TraceEvent::LiteralEvaluated {
                rule,
                literal,
                span,
            }
            | TraceEvent::LiteralCached {
                rule,
                literal,
                span,
            } => format!(
                "\"rule\":\"{}\",\"literal\":\"{}\",\"span\":{}",
                esc(rule),
                esc(literal),
                Self::format_span(*span)
            ),
            TraceEvent::ReferenceResolved { rule, target, span } => format!(
                "\"rule\":\"{}\",\"target\":\"{}\",\"span\":{}",
                esc(rule),
                esc(target),
                Self::format_span(*span)
            ),
        };

        format!(
            "{{\"id\":{},\"run\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.run,
            record.timestamp_ns,
            record.event_type(),
            event_data
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
