//! Configuration for the observability system.

use crate::trace::{TraceOutput, TracerConfig};

/// How much of an evaluation run gets traced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceVerbosity {
    /// Run boundaries only.
    #[default]
    Minimal,
    /// Run boundaries plus per-rule start and outcome.
    Standard,
    /// Every literal search, cache hit and reference resolution.
    Full,
}

impl TraceVerbosity {
    /// Event types recorded at this level.
    #[must_use]
    pub fn event_types(self) -> &'static [&'static str] {
        const MINIMAL: &[&str] = &["run_start", "run_end"];
        const STANDARD: &[&str] = &["run_start", "run_end", "rule_start", "rule_finished"];
        const FULL: &[&str] = &[
            "run_start",
            "run_end",
            "rule_start",
            "rule_finished",
            "literal_evaluated",
            "literal_cached",
            "reference_resolved",
        ];
        match self {
            Self::Minimal => MINIMAL,
            Self::Standard => STANDARD,
            Self::Full => FULL,
        }
    }
}

/// Configuration for the observability system.
///
/// Controls whether evaluation runs are traced, how much is kept, and where
/// it goes.
#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// Whether observability is enabled (false = zero overhead).
    pub enabled: bool,

    /// Current verbosity level.
    pub verbosity: TraceVerbosity,

    /// Trace ring buffer size (number of records to retain).
    pub buffer_size: usize,

    /// Output trace to stderr.
    pub trace_to_stderr: bool,

    /// Output format: true for JSON, false for human-readable.
    pub json_output: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            verbosity: TraceVerbosity::Minimal,
            buffer_size: 10_000,
            trace_to_stderr: true,
            json_output: false,
        }
    }
}

impl ObservabilityConfig {
    /// Creates a new configuration with observability enabled.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Creates a configuration for development with Standard verbosity.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            verbosity: TraceVerbosity::Standard,
            buffer_size: 10_000,
            trace_to_stderr: true,
            json_output: false,
        }
    }

    /// Creates a configuration for debugging with Full verbosity.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            enabled: true,
            verbosity: TraceVerbosity::Full,
            buffer_size: 100_000,
            trace_to_stderr: true,
            json_output: false,
        }
    }

    /// Builder method to set enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder method to set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: TraceVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Builder method to set the trace buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to enable/disable stderr tracing.
    #[must_use]
    pub fn with_trace_to_stderr(mut self, trace: bool) -> Self {
        self.trace_to_stderr = trace;
        self
    }

    /// Builder method to enable/disable JSON output.
    #[must_use]
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// The tracer configuration these settings describe.
    #[must_use]
    pub fn tracer_config(&self) -> TracerConfig {
        let event_filter = match self.verbosity {
            TraceVerbosity::Full => Vec::new(),
            level => level.event_types().iter().map(|t| (*t).to_string()).collect(),
        };
        TracerConfig {
            enabled: self.enabled,
            buffer_size: self.buffer_size,
            output: if self.trace_to_stderr {
                TraceOutput::Stderr
            } else {
                TraceOutput::None
            },
            json_format: self.json_output,
            event_filter,
        }
    }
}
