//! Error types for link extraction and filtering
//!
//! This module defines the domain error types used throughout the crate.

use thiserror::Error;

/// Which pattern list of a filter configuration a pattern came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Follow,
    Exclude,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Follow => f.write_str("follow"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// Errors raised while compiling a link filter policy
#[derive(Error, Debug)]
pub enum FilterError {
    /// A follow or exclude pattern is not a valid regular expression
    #[error("Invalid {kind} pattern {pattern:?}: {source}")]
    InvalidPattern {
        kind: PatternKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Unrecognized `links_to_follow` value
    #[error("Unknown links_to_follow mode: {0}")]
    UnknownMode(String),
}

/// Errors raised while preparing documents for extraction
#[derive(Error, Debug)]
pub enum ParseError {
    /// Encoding label not known to the WHATWG encoding standard
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}
