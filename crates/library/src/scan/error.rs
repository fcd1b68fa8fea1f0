//! Error types for the [`scan`](super) module.
//!
//! These never leave the crate: every failure is either turned into a
//! [`Diagnostic`](super::Diagnostic) or, when scanning strictly, raised as a
//! library [`ErrorKind`](crate::error::ErrorKind).

use derive_more::{Display, Error};
use std::path::PathBuf;

pub(crate) type Error = exn::Exn<ErrorKind>;
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Classifies why a single candidate map could not be scanned.
#[derive(Debug, Display, Error)]
pub(crate) enum ErrorKind {
    /// The candidate folder or its descriptor could not be read.
    #[display("unreadable: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
    /// The descriptor was read but a numeric field could not be parsed.
    #[display("malformed descriptor {}: {detail}", path.display())]
    Malformed { path: PathBuf, detail: String },
}
