//! Tracing for tagmatch evaluation runs.
//!
//! This crate provides:
//! - `Tracer` - an [`EvalObserver`](tagmatch_engine::EvalObserver) that
//!   records evaluation events into a ring buffer
//! - `HumanFormatter` / `JsonFormatter` - trace output formats
//! - `ObservabilityConfig` - presets for wiring a tracer up

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod trace;

pub use config::{ObservabilityConfig, TraceVerbosity};
pub use trace::{
    HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter,
    TraceOutput, TraceRecord, Tracer, TracerConfig,
};
