//! # Error Hierarchy
//!
//! Structured error types for profile loading, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Parsing is fail-fast: a [`ParseError`] names the first offending line and
//! nothing after it is examined.

use thiserror::Error;

/// Why a profile line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line is not a `KEY=VALUE` assignment with an uppercase key.
    #[error("invalid assignment syntax")]
    InvalidAssignment,

    /// A value opened with `"` or `'` but did not close with the same quote.
    #[error("unclosed quoted value")]
    UnclosedQuote,

    /// The value contains `${`, `$(` or a backtick.
    #[error("interpolation is not allowed")]
    Interpolation,
}

/// A profile line that failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// The rejection reason.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a parse error for the given line.
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Errors raised while loading a profile file from disk.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file could not be read.
    #[error("failed to load profile {path}: {reason}")]
    DocumentLoadError {
        /// Path to the profile that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The profile file was read but a line failed to parse.
    #[error("{path}:{}: {}", .source.line, .source.kind)]
    ParseFailed {
        /// Path to the offending profile.
        path: String,
        /// The line-level parse failure.
        #[source]
        source: ParseError,
    },
}
