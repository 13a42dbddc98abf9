//! Error types for splice operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.
//! A pattern that simply does not match is not an error; it is reported as
//! [`crate::Outcome::NotFound`] in the audit trail.

use omni_io::IoError;
use thiserror::Error;

/// Error types for splice operations.
#[derive(Error, Debug)]
pub enum SpliceError {
    /// Reading or writing the target file failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Invalid regular expression in a rule or definition header.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Line patch addressed a line the file does not have.
    #[error("Line {line} out of range: file has only {lines} lines")]
    LineOutOfRange {
        /// Requested 1-indexed line.
        line: usize,
        /// Number of lines in the buffer.
        lines: usize,
    },
}

impl From<regex::Error> for SpliceError {
    fn from(e: regex::Error) -> Self {
        Self::Pattern(e.to_string())
    }
}
