//! Unified error handling for the linkscout crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! domain-specific errors usable on their own.
//!
//! # Architecture
//!
//! - [`LinkscoutErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Link extraction itself never fails; errors only surface while compiling
//! filters or reading input documents. None of them is worth retrying.

use std::io;
use thiserror::Error;

pub use crate::utils::error::{FilterError, ParseError, PatternKind};

/// Common trait for all linkscout error types
pub trait LinkscoutErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Short user-facing description
    fn user_message(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input documents and their encodings
    Parsing,
    /// Reading input files
    Storage,
    /// Configuration and filter patterns
    Config,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parsing => "parsing error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
        }
    }
}

impl LinkscoutErrorTrait for FilterError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn user_message(&self) -> String {
        match self {
            Self::InvalidPattern { kind, pattern, .. } => {
                format!("{kind} pattern {pattern:?} does not compile")
            }
            Self::UnknownMode(mode) => format!("links_to_follow {mode:?} is not supported"),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Config
    }
}

impl LinkscoutErrorTrait for ParseError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn user_message(&self) -> String {
        self.to_string()
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

/// Unified error type for the linkscout crate
#[derive(Error, Debug)]
pub enum Error {
    /// Filter compilation errors
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Document and encoding errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LinkscoutErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Filter(e) => e.is_recoverable(),
            Self::Parse(e) => e.is_recoverable(),
            Self::Io(_) => false,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Filter(e) => e.user_message(),
            Self::Parse(e) => e.user_message(),
            Self::Io(e) => format!("{}: {e}", self.category().label()),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Filter(_) => ErrorCategory::Config,
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::Io(_) => ErrorCategory::Storage,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
