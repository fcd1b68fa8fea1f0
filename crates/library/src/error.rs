//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a library failure.
///
/// ### Input Errors
/// - [`ErrorKind::MalformedDescriptor`] - only raised when scanning strictly;
///   otherwise the map is skipped and a diagnostic recorded.
/// - [`ErrorKind::ExclusionList`]
///
/// ### Output Errors
/// - [`ErrorKind::Template`]
/// - [`ErrorKind::TimestampFormat`]
/// - [`ErrorKind::OutputLocked`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A descriptor contained a numeric field that could not be parsed.
    #[display("malformed descriptor: {}", _0.display())]
    MalformedDescriptor(#[error(not(source))] PathBuf),
    /// The facility exclusion list could not be read. There is no fallback.
    #[display("unable to read exclusion list: {}", _0.display())]
    ExclusionList(#[error(not(source))] PathBuf),
    #[display("issue with file name generation from template")]
    Template,
    #[display("invalid timestamp format: {_0}")]
    TimestampFormat(#[error(not(source))] String),
    /// The output file could not be opened for writing, most likely because
    /// another program holds it open.
    #[display("output file is locked or unwritable: {}", _0.display())]
    OutputLocked(#[error(not(source))] PathBuf),
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Closing the application that locks the output is exactly the retry.
        matches!(self, Self::OutputLocked(_) | Self::Io)
    }
}
