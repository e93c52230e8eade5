//! errors.rs - Custom error types for the autolink-core library.
//!
//! This module defines a structured error enum for rule compilation and
//! configuration loading, plus the non-fatal `SpanIntegrityFault` that the
//! rewriter records when a parsed span no longer lines up with the text.
//!
//! License: MIT OR APACHE 2.0

use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `autolink-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AutolinkError {
    #[error("Failed to compile link rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Link rule '{rule}' has an empty pattern")]
    EmptyPattern { rule: String },

    #[error("Link rule '{rule}': pattern length ({len}) exceeds maximum allowed ({max})")]
    PatternLengthExceeded { rule: String, len: usize, max: usize },

    #[error("Failed to read link configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse link configuration {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },
}

impl AutolinkError {
    /// Name of the rule this error refers to, if any.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            AutolinkError::InvalidPattern { rule, .. }
            | AutolinkError::EmptyPattern { rule }
            | AutolinkError::PatternLengthExceeded { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

/// A plain-text node whose recorded text disagrees with the live output.
///
/// This points at a parser or offset-tracking bug. The span is left untouched
/// and the rewrite carries on with the next node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Markdown text did not match range text at {range:?}: '{expected}' != '{found}'")]
pub struct SpanIntegrityFault {
    /// Range in the original document, as reported by the parser.
    pub range: Range<usize>,
    /// Text the parser recorded for the node.
    pub expected: String,
    /// Text actually found at the adjusted range, or empty if the range was unusable.
    pub found: String,
}
