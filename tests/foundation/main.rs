//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Token, TokenSpan, MatchRange, and Error.

mod ranges;
