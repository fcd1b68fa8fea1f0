//! Application Error Types
//!
//! Every failure that ends a run is one of these kinds. Each kind knows the
//! message shown to the person at the console; the full error tree is logged.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A given or typed-in path does not exist.
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    #[display("unable to read from the console")]
    Console,
    #[display("invalid configuration")]
    Config,
    #[display("unable to scan the database")]
    Scan,
    /// Raised instead of [`ErrorKind::Scan`] when scanning strictly.
    #[display("malformed descriptor: {}", _0.display())]
    MalformedDescriptor(#[error(not(source))] PathBuf),
    #[display("unable to read exclusion list: {}", _0.display())]
    ExclusionList(#[error(not(source))] PathBuf),
    #[display("unable to name output files")]
    Naming,
    #[display("unable to render report")]
    Render,
    #[display("output file is locked: {}", _0.display())]
    OutputLocked(#[error(not(source))] PathBuf),
    #[display("unable to write CSV export")]
    Export,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OutputLocked(_))
    }

    /// What to tell the person running the tool.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidPath(_) => "Invalid path".to_string(),
            Self::OutputLocked(path) => format!(
                "Could not write {}.\nPlease close other copies of the file (e.g. in a PDF viewer or spreadsheet) and run again.",
                path.display()
            ),
            Self::MalformedDescriptor(path) => format!("The map descriptor {} could not be read.", path.display()),
            Self::ExclusionList(path) => format!("The facility list {} could not be read.", path.display()),
            Self::Render => "The PDF reports could not be created. Is Chrome or Chromium installed?".to_string(),
            other => {
                let mut message = other.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            },
        }
    }
}
