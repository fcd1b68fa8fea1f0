pub mod aggregate;
pub mod csv;
pub mod error;
pub mod layout;
pub mod scan;
pub mod table;
mod template;

pub use crate::aggregate::ExclusionList;
pub use crate::layout::{Layout, LayoutKind};
pub use crate::scan::{ScanOptions, ScanReport, scan};
pub use crate::table::{ReportTable, TableKind};
pub use crate::template::{FileNameGenerator, timestamp};
