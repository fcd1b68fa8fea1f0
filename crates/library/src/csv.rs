//! Semicolon-separated export of a [`ReportTable`].
//!
//! The layout matches what spreadsheet users of the previous tooling expect:
//! a leading, unnamed index column holding the 0-based row number, `;` as the
//! separator, and minimal quoting (only fields containing `;`, `"`, CR or LF
//! are quoted, with embedded quotes doubled).

use crate::error::{ErrorKind, Result};
use crate::table::ReportTable;
use exn::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::instrument;

pub const SEPARATOR: char = ';';
const QUOTE: char = '"';

/// Writes `table` as CSV to `writer`.
pub fn write_csv(table: &ReportTable, mut writer: impl Write) -> std::io::Result<()> {
    let mut line = String::new();
    for header in table.headers() {
        line.push(SEPARATOR);
        push_field(&mut line, header);
    }
    writeln!(writer, "{line}")?;
    for (index, row) in table.rows().iter().enumerate() {
        line.clear();
        line.push_str(&index.to_string());
        for cell in &row.cells {
            line.push(SEPARATOR);
            push_field(&mut line, cell);
        }
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Writes `table` to a new file at `path`, replacing any existing one.
#[instrument(level = "debug", skip(table), fields(path = %path.as_ref().display(), rows = table.len()))]
pub fn export(table: &ReportTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).or_raise(|| ErrorKind::OutputLocked(path.to_path_buf()))?;
    write_csv(table, BufWriter::new(file)).or_raise(|| ErrorKind::Io)?;
    tracing::info!(path = %path.display(), "Wrote CSV export");
    Ok(())
}

fn push_field(line: &mut String, value: &str) {
    if value.contains([SEPARATOR, QUOTE, '\r', '\n']) {
        line.push(QUOTE);
        line.push_str(&value.replace(QUOTE, "\"\""));
        line.push(QUOTE);
    } else {
        line.push_str(value);
    }
}
