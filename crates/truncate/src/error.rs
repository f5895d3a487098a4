//! Truncation Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A truncation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for truncation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An end tag did not match the innermost open tag. The markup is
    /// malformed and no output was produced.
    #[display("unbalanced tags: unexpected </{found}> at byte {offset}")]
    UnbalancedTags {
        /// Name of the offending end tag.
        found: String,
        /// The innermost open tag at that point, if any.
        open: Option<String>,
        /// Byte offset of the offending end tag in the input.
        offset: usize,
    },
    /// Byte input was not valid UTF-8.
    #[display("input is not valid UTF-8")]
    InvalidEncoding,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same input always produces the same outcome.
        false
    }
}
