use derive_more::Display;
use mapdef_extract::models::{Category, MapRecord};
use std::collections::BTreeMap;
use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Why part of the database was skipped during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DiagnosticKind {
    #[display("category folder could not be listed")]
    CategoryUnreadable,
    #[display("label index could not be listed")]
    LabelIndexUnreadable,
    #[display("map folder could not be read")]
    CandidateUnreadable,
    #[display("no descriptor file")]
    NoDescriptor,
    #[display("malformed descriptor: {_0}")]
    MalformedDescriptor(String),
}

/// A failure that was swallowed so the scan could continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub category: Option<Category>,
    pub kind: DiagnosticKind,
}
impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, category: impl Into<Option<Category>>, kind: DiagnosticKind) -> Self {
        Self { path: path.into(), category: category.into(), kind }
    }

    /// Folders without a descriptor are expected (fonts, shared resources)
    /// and not worth reporting to the user.
    pub fn is_noteworthy(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::NoDescriptor)
    }
}
impl FmtDisplay for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.category {
            Some(category) => write!(f, "[{category}] {}: {}", self.path.display(), self.kind),
            None => write!(f, "{}: {}", self.path.display(), self.kind),
        }
    }
}

/// Everything a scan of one database root produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// In discovery order: by category, then by folder name.
    pub records: Vec<MapRecord>,
    /// Entries found in each category folder, whether or not they held a map.
    pub candidates: BTreeMap<Category, usize>,
    pub diagnostics: Vec<Diagnostic>,
}
impl ScanReport {
    pub fn candidates(&self, category: Category) -> usize {
        self.candidates.get(&category).copied().unwrap_or_default()
    }

    pub fn total_candidates(&self) -> usize {
        self.candidates.values().sum()
    }

    /// `true` when there is nothing to report on.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn noteworthy(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_noteworthy())
    }
}
