//! Tracing system for tagmatch evaluation.
//!
//! A [`Tracer`] is an [`EvalObserver`]: hand it to
//! [`RuleEvaluator::with_observer`](tagmatch_engine::RuleEvaluator::with_observer)
//! and every run, rule and literal outcome is recorded into a ring buffer,
//! optionally echoed to stderr as it happens. A disabled tracer costs one
//! branch per event.
//!
//! # Example
//!
//! ```
//! use tagmatch_debug::{Tracer, TracerConfig};
//! use tagmatch_engine::{Literal, MatchRule, MatchRuleSet, RuleEvaluator};
//! use tagmatch_foundation::Token;
//!
//! let rules = MatchRuleSet::new([MatchRule::new(
//!     "animal",
//!     vec![vec![Literal::words(["cat"]).unwrap()]],
//! )])
//! .unwrap();
//! let tokens = [Token::new("The", 0, 3), Token::new("cat", 4, 7)];
//!
//! let tracer = Tracer::new(TracerConfig::new().enabled());
//! RuleEvaluator::new()
//!     .with_observer(&tracer)
//!     .evaluate(&rules, &tokens)
//!     .unwrap();
//!
//! assert_eq!(tracer.buffer().records_for_run(1).len(), 5);
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tagmatch_engine::{EvalEvent, EvalObserver};

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write each record to stderr as it is recorded.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10000,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }

    fn accepts(&self, event_type: &str) -> bool {
        self.event_filter.is_empty() || self.event_filter.iter().any(|t| t == event_type)
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records evaluation events.
///
/// Recording takes `&self` so one tracer can observe parallel runs; the
/// buffer sits behind a mutex. Run numbers start at 1 and advance on every
/// `run_start` event, so records from concurrent runs sharing a tracer are
/// attributed to the most recently started one.
#[derive(Debug)]
pub struct Tracer {
    config: TracerConfig,
    buffer: Mutex<TraceBuffer>,
    current_run: AtomicU64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: Mutex::new(TraceBuffer::new(buffer_size)),
            current_run: AtomicU64::new(0),
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Creates an enabled tracer that outputs to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(TracerConfig::new().enabled().to_stderr())
    }

    /// Returns the tracer configuration.
    #[must_use]
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Returns the number of the current run (0 before the first run).
    #[must_use]
    pub fn current_run(&self) -> u64 {
        self.current_run.load(Ordering::Acquire)
    }

    /// Records a trace event under the current run.
    #[inline]
    pub fn record(&self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&self, event: TraceEvent) {
        // runs advance even when run_start itself is filtered out
        let run = if matches!(event, TraceEvent::RunStart { .. }) {
            self.current_run.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            self.current_run()
        };

        if !self.config.accepts(event.event_type()) {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;

        let mut buffer = self.buffer();
        let id = buffer.push(run, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = buffer.get(id) {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Locks and returns the trace buffer.
    ///
    /// Hold the guard only briefly: recording blocks while it is alive.
    pub fn buffer(&self) -> MutexGuard<'_, TraceBuffer> {
        // a panic while holding the lock cannot leave the buffer half-written
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the records for one run.
    #[must_use]
    pub fn run_records(&self, run: u64) -> Vec<TraceRecord> {
        self.buffer()
            .records_for_run(run)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Formats the records of the most recent run.
    #[must_use]
    pub fn format_last_run(&self) -> String {
        let records = self.run_records(self.current_run());
        let refs: Vec<_> = records.iter().collect();
        self.format_records(&refs)
    }

    /// Clears the trace buffer.
    pub fn clear(&self) {
        self.buffer().clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer().stats()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl EvalObserver for Tracer {
    #[inline]
    fn observe(&self, event: &EvalEvent<'_>) {
        if !self.config.enabled {
            return;
        }
        self.record_internal(TraceEvent::from(event));
    }
}

// =============================================================================
// Tests
// =============================================================================
