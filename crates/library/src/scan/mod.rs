//! Discovery of map folders and their descriptors.
//!
//! A scan walks each category folder of a [`Layout`] in discovery order. Every
//! immediate child is a *candidate*; candidates holding a descriptor file
//! become [`MapRecord`]s. Failures are contained to the candidate (or
//! category) they occur in and recorded as [`Diagnostic`]s, except malformed
//! descriptors when scanning strictly.

pub(crate) mod error;
mod file;
mod labels;
mod report;

pub use self::labels::LabelFiles;
pub use self::report::{Diagnostic, DiagnosticKind, ScanReport};
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::layout::Layout;
use crate::scan::error::ErrorKind;
use mapdef_extract::ParseOptions;
use mapdef_extract::models::Category;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub parse: ParseOptions,
    /// Abort on the first malformed descriptor rather than skipping the map.
    pub strict: bool,
}

/// Scans every category of the database at `layout`.
///
/// Categories are visited in [`Category::ALL`] order and candidates within a
/// category in byte-wise folder name order, which is the order records appear
/// in the returned report. Each candidate's descriptor is parsed with
/// `options.parse`, and the label index is consulted to flag maps with an SQL
/// label file.
///
/// A missing or unlistable category folder counts zero candidates and adds a
/// [`DiagnosticKind::CategoryUnreadable`]; an unreadable label index is
/// treated as empty. Folders without a descriptor, unreadable folders and
/// malformed descriptors are skipped with a diagnostic each.
///
/// # Errors
///
/// Only with `options.strict`: the first malformed descriptor aborts the scan
/// with [`MalformedDescriptor`](LibraryErrorKind::MalformedDescriptor) naming
/// its path.
#[instrument(skip_all, fields(root = %layout.root().display()))]
pub fn scan(layout: &Layout, options: ScanOptions) -> LibraryResult<ScanReport> {
    let mut report = ScanReport::default();
    let label_dir = layout.label_dir();
    let labels = match LabelFiles::load(&label_dir) {
        Ok(labels) => labels,
        Err(err) => {
            tracing::warn!(path = %label_dir.display(), error = %err, "Label index unavailable; treating as empty");
            report.diagnostics.push(Diagnostic::new(label_dir, None, DiagnosticKind::LabelIndexUnreadable));
            LabelFiles::default()
        },
    };
    for category in Category::ALL {
        scan_category(layout, category, &labels, options, &mut report)?;
    }
    tracing::info!(
        records = report.records.len(),
        candidates = report.total_candidates(),
        diagnostics = report.diagnostics.len(),
        "Scan complete"
    );
    Ok(report)
}

fn scan_category(
    layout: &Layout,
    category: Category,
    labels: &LabelFiles,
    options: ScanOptions,
    report: &mut ScanReport,
) -> LibraryResult<()> {
    let dir = layout.category_dir(category);
    let candidates = match list_candidates(&dir) {
        Ok(candidates) => candidates,
        Err(err) => {
            tracing::debug!(path = %dir.display(), %category, error = %err, "Category folder not listable");
            report.diagnostics.push(Diagnostic::new(dir, category, DiagnosticKind::CategoryUnreadable));
            report.candidates.insert(category, 0);
            return Ok(());
        },
    };
    report.candidates.insert(category, candidates.len());
    for path in candidates {
        match file::scan_candidate(&path, category, labels, options.parse) {
            Ok(Some(record)) => report.records.push(record),
            Ok(None) => {
                tracing::debug!(path = %path.display(), %category, "No descriptor; skipping");
                report.diagnostics.push(Diagnostic::new(path, category, DiagnosticKind::NoDescriptor));
            },
            Err(err) => {
                let kind = match &*err {
                    ErrorKind::Malformed { path, detail } => {
                        if options.strict {
                            let path = path.clone();
                            return Err(err.raise(LibraryErrorKind::MalformedDescriptor(path)));
                        }
                        tracing::warn!(path = %path.display(), %category, %detail, "Skipping malformed descriptor");
                        DiagnosticKind::MalformedDescriptor(detail.clone())
                    },
                    ErrorKind::Unreadable(failed) => {
                        tracing::warn!(path = %failed.display(), %category, "Skipping unreadable map folder");
                        DiagnosticKind::CandidateUnreadable
                    },
                };
                report.diagnostics.push(Diagnostic::new(path, category, kind));
            },
        }
    }
    Ok(())
}

/// Immediate children of a category folder, in byte-wise name order.
fn list_candidates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path())).collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
