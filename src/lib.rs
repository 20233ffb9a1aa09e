//! Tagmatch - CNF token-pattern rules over tokenized text
//!
//! This crate re-exports all layers of the tagmatch system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: tagmatch_debug      - Evaluation tracing, trace formatters
//! Layer 1: tagmatch_engine     - Patterns, rules, rule sets, evaluation, highlighting
//! Layer 0: tagmatch_foundation - Core types (Token, TokenSpan, MatchRange, Error)
//! ```

pub use tagmatch_debug as debug;
pub use tagmatch_engine as engine;
pub use tagmatch_foundation as foundation;
