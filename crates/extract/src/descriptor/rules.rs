use crate::error::{ErrorKind, Result};
use crate::models::{Category, Coordinate};
use exn::{OptionExt, ResultExt};

/// The [`MapRecord`](crate::models::MapRecord) field a rule fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    MapType,
    Name,
    Group,
    Priority,
    CategoryCode,
    Publication,
    BoundingBoxMin,
    BoundingBoxMax,
}
impl Target {
    /// Name used in parse errors and log events.
    pub fn label(&self) -> &'static str {
        match self {
            Target::MapType => "type",
            Target::Name => "name",
            Target::Group => "group",
            Target::Priority => "priority",
            Target::CategoryCode => "category",
            Target::Publication => "publication",
            Target::BoundingBoxMin => "bbmin",
            Target::BoundingBoxMax => "bbmax",
        }
    }
}

/// What happens to the line terminator of a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Strip,
    /// Keep the terminator for vector maps, strip it for everything else.
    /// Only takes effect with [`ParseOptions::preserve_category_newline`](super::ParseOptions).
    KeepForVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Everything from `offset` characters into the line.
    Text { offset: usize, newline: Newline },
    /// An integer starting `offset` characters into the line.
    Integer { offset: usize },
    /// Two floats separated by the line's first two spaces.
    Corner,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub keyword: &'static str,
    pub target: Target,
    pub extraction: Extraction,
}

/// A value pulled out of one descriptor line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Text(String),
    Integer(i64),
    Corner(Coordinate),
}

impl FieldRule {
    pub(crate) fn matches(&self, line: &str) -> bool {
        line.contains(self.keyword)
    }

    pub(crate) fn extract(&self, line: &str, category: Category, keep_legacy_newline: bool) -> Result<Value> {
        match self.extraction {
            Extraction::Text { offset, newline } => {
                let text = tail(line, offset);
                let keep = newline == Newline::KeepForVector && keep_legacy_newline && category == Category::Vector;
                Ok(Value::Text(match keep {
                    true if ends_with_newline(text) => format!("{}\n", strip_newline(text)),
                    _ => strip_newline(text).to_string(),
                }))
            },
            Extraction::Integer { offset } => {
                let raw = tail(line, offset).trim();
                let parsed = raw.parse::<i64>().or_raise(|| ErrorKind::ParseError {
                    field: self.target.label(),
                    value: raw.to_string(),
                })?;
                Ok(Value::Integer(parsed))
            },
            Extraction::Corner => corner(line, self.target.label()).map(Value::Corner),
        }
    }
}

/// The remainder of `line` after skipping `offset` characters.
fn tail(line: &str, offset: usize) -> &str {
    line.char_indices().nth(offset).map_or("", |(i, _)| &line[i..])
}

fn ends_with_newline(s: &str) -> bool {
    s.ends_with('\n')
}

fn strip_newline(s: &str) -> &str {
    s.strip_suffix('\n').map(|s| s.strip_suffix('\r').unwrap_or(s)).unwrap_or(s)
}

/// Splits `line` at its first two spaces: the segment between them is X, the
/// rest of the line is Y.
fn corner(line: &str, field: &'static str) -> Result<Coordinate> {
    let malformed = || ErrorKind::ParseError { field, value: strip_newline(line).to_string() };
    let mut spaces = line.match_indices(' ').map(|(i, _)| i);
    let first = spaces.next().ok_or_raise(malformed)?;
    let second = spaces.next().ok_or_raise(malformed)?;
    let x = line[first..second].trim();
    let y = line[second..].trim();
    let x = x.parse::<f64>().or_raise(malformed)?;
    let y = y.parse::<f64>().or_raise(malformed)?;
    Ok(Coordinate::new(x, y))
}
