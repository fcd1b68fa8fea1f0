//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;
use std::time::Duration;

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("chrome/chromium not detected on your system")]
    ChromeNotFound,
    /// An explicitly configured executable does not exist or is not runnable.
    #[display("configured Chrome executable not found: {}", _0.display())]
    ChromeMissing(#[error(not(source))] PathBuf),
    #[display("Chrome did not finish within {}s", _0.as_secs())]
    ChromeTimeout(#[error(not(source))] Duration),
    /// Chrome exited with a non-zero exit code, or was killed by a signal
    /// (reported as `-1`).
    #[display("Chrome exited with code: {_0}")]
    ChromeFailed(#[error(not(source))] i32),
    /// Asset was not loadable (either file or builtin).
    #[display("asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
    /// The destination could not be opened for writing; usually another
    /// program (a PDF viewer) still has it open.
    #[display("output file is locked or unwritable: {}", _0.display())]
    OutputLocked(#[error(not(source))] PathBuf),
    /// The path cannot be expressed as a `file://` URL.
    #[display("not a local file path: {}", _0.display())]
    NotAFilePath(#[error(not(source))] PathBuf),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ChromeTimeout(_) | Self::OutputLocked(_))
    }
}
