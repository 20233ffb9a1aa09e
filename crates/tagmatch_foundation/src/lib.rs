//! Core types and errors for tagmatch.
//!
//! This crate provides:
//! - [`Token`] - A word of the input text with its character span
//! - [`TokenSpan`] - Half-open token index ranges
//! - [`MatchRange`] - The reported span of a satisfied rule
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod range;
pub mod token;

pub use error::{Error, ErrorContext, ErrorKind, PatternDefect, Result};
pub use range::{MatchRange, TokenSpan};
pub use token::Token;
