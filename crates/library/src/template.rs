//! Output file naming.
//!
//! Report file names are rendered from a user-configured [upon] template.
//! The template syntax follows upon's Mustache-like conventions
//! (`{{ variable }}`, `{{ value|formatter }}`), extended with a `filename`
//! formatter. It replaces path separators, characters reserved on common
//! filesystems and control characters with `_`, so a display name such as
//! `EU 2024/06` can safely become part of a file name.
//!
//! # Template Variables
//!
//! | Variable    | Type     | Description                                        |
//! |-------------|----------|----------------------------------------------------|
//! | `kind`      | `String` | Report kind: `Extended` or `Overview`              |
//! | `name`      | `String` | Database display name (e.g. `EU 2024.06`)          |
//! | `timestamp` | `String` | Run time, already formatted (see [`timestamp`])    |
//!
//! # Example
//!
//! ```
//! use mapdef_library::FileNameGenerator;
//! use mapdef_library::table::TableKind;
//!
//! let generator: FileNameGenerator = "{{ kind }}_{{ name|filename }}_{{ timestamp }}".parse().unwrap();
//! let name = generator.generate_with_ext(TableKind::Overview, "EU 2024/06", "09_41_07", "pdf").unwrap();
//! assert_eq!(name, "Overview_EU 2024_06_09_41_07.pdf");
//! ```

use crate::error::{Error, ErrorKind, Result};
use crate::table::TableKind;
use exn::ResultExt;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description;
use tracing::instrument;
use upon::{Engine, Template};

/// Generates report file names from a user-defined template string.
///
/// Constructed via [`FromStr`], which compiles the template eagerly so that
/// syntax errors surface at creation time rather than at render time.
pub struct FileNameGenerator {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for FileNameGenerator {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}
impl FileNameGenerator {
    /// Renders the template, returning a single path component without any
    /// file extension.
    #[instrument(level = "debug", skip(self))]
    pub fn generate(&self, kind: TableKind, name: &str, timestamp: &str) -> Result<String> {
        let rendered = self
            .template
            .render(
                &self.engine,
                upon::value! {
                    kind: kind.to_string(),
                    name: name,
                    timestamp: timestamp,
                },
            )
            .to_string()
            .or_raise(|| ErrorKind::Template)?;
        Self::normalize(rendered)
    }

    /// Renders the template and appends a file extension. Both `"pdf"` and
    /// `".pdf"` produce the same result.
    pub fn generate_with_ext(&self, kind: TableKind, name: &str, timestamp: &str, ext: impl AsRef<str>) -> Result<String> {
        let file_name = self.generate(kind, name, timestamp)?;
        Ok(format!("{file_name}.{}", ext.as_ref().trim().trim_matches('.')))
    }

    /// The result must stay inside the output directory: exactly one
    /// non-empty path component.
    fn normalize(s: impl Into<String>) -> Result<String> {
        let name = s.into().trim().to_string();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            tracing::warn!(%name, "Rendered file name is not a single path component");
            exn::bail!(ErrorKind::Template);
        }
        Ok(name)
    }
}

/// Formats `at` with a [`time` format description](https://time-rs.github.io/book/api/format-description.html).
pub fn timestamp(at: OffsetDateTime, format: &str) -> Result<String> {
    let description =
        format_description::parse(format).or_raise(|| ErrorKind::TimestampFormat(format.to_string()))?;
    at.format(&description).or_raise(|| ErrorKind::TimestampFormat(format.to_string()))
}

/// Custom [`upon`] extensions for file-name-safe strings.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    /// Keeps the value readable while making it safe as (part of) a file name.
    fn filename_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                let safe: String =
                    s.chars().map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c }).collect();
                f.write_str(&safe)?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("filename", filename_formatter);
    }
}
