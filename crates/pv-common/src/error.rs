//! Error types for procview.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - A fatality hint that maps onto the process exit contract
//!
//! Local conditions (a command name that cannot be decoded, a requested
//! slot with no live entry) are recovered inside the enumeration walk and
//! surface as informational rows, not as process failures. Only argument,
//! pattern, and I/O errors abort an invocation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for procview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or out-of-range command-line input.
    Argument,
    /// A command-name source was null or unreadable.
    Decode,
    /// A requested registry slot has no live entry.
    Lookup,
    /// A search pattern was too long or uncompilable.
    Pattern,
    /// Output stream errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Argument => write!(f, "argument"),
            ErrorCategory::Decode => write!(f, "decode"),
            ErrorCategory::Lookup => write!(f, "lookup"),
            ErrorCategory::Pattern => write!(f, "pattern"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for procview.
///
/// The message strings for user-facing variants are part of the CLI
/// surface and match the historical diagnostics of the tool.
#[derive(Error, Debug)]
pub enum Error {
    // Argument errors (10-19)
    #[error("Process number must be between 1 and 999")]
    InvalidProcessNumber { given: i64 },

    #[error("Command name must be at most {max} characters (got {length})")]
    InvalidCommandName { length: usize, max: usize },

    // Decode errors (20-29)
    #[error("Error getting command name")]
    NullSource,

    // Lookup errors (30-39)
    #[error("No such process")]
    NoSuchProcess { slot: u16 },

    // Pattern errors (40-49)
    #[error("Pattern too long")]
    PatternTooLong { needed: usize, capacity: usize },

    // I/O errors (50-59)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: Argument errors
    /// - 20-29: Decode errors
    /// - 30-39: Lookup errors
    /// - 40-49: Pattern errors
    /// - 50-59: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidProcessNumber { .. } => 10,
            Error::InvalidCommandName { .. } => 11,
            Error::NullSource => 20,
            Error::NoSuchProcess { .. } => 30,
            Error::PatternTooLong { .. } => 40,
            Error::Io(_) => 50,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidProcessNumber { .. } | Error::InvalidCommandName { .. } => {
                ErrorCategory::Argument
            }
            Error::NullSource => ErrorCategory::Decode,
            Error::NoSuchProcess { .. } => ErrorCategory::Lookup,
            Error::PatternTooLong { .. } => ErrorCategory::Pattern,
            Error::Io(_) => ErrorCategory::Io,
        }
    }

    /// Whether this error aborts the invocation.
    ///
    /// Decode and lookup conditions are recovered locally inside the
    /// enumeration walk; they never reach the top level as errors.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Argument | ErrorCategory::Pattern | ErrorCategory::Io
        )
    }
}
