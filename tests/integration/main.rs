//! Cross-layer integration tests for tagmatch
//!
//! Tests that verify correct interaction between multiple crates.

mod observability;
mod pipeline;
