//! Field extraction from `map.def` descriptor files.
//!
//! Descriptors are loosely structured `key value` lines. Rather than tokenize
//! them, each line is matched against the rule table in [`consts`](crate::consts)
//! by substring containment; the first matching rule claims the line and
//! slices its value out at a fixed offset.

mod rules;

pub use self::rules::{Extraction, FieldRule, Newline, Target};
use self::rules::Value;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Category, Field, MapRecord};
use exn::ResultExt;
use std::fs;
use std::path::Path;
use tracing::instrument;

/// Knobs for descriptor parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the trailing newline on the `category` value of vector maps, as
    /// older tooling did. Off by default: every category is stripped.
    pub preserve_category_newline: bool,
}

/// The raw contents of one descriptor file.
#[derive(Debug, Clone)]
pub struct Descriptor {
    text: String,
}
impl Descriptor {
    /// Accepts raw bytes; invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self { text: String::from_utf8_lossy(bytes.as_ref()).into_owned() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Extracts a [`MapRecord`] for the map folder `folder` of `category`.
    ///
    /// Fields the descriptor never mentions stay [`Field::Missing`]. When a
    /// field appears more than once, the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ParseError`] if a `priority`, `bbmin` or `bbmax`
    /// line is present but its numeric payload is malformed.
    #[instrument(level = "debug", skip(self, options), fields(bytes = self.text.len()))]
    pub fn record(&self, category: Category, folder: &str, options: ParseOptions) -> Result<MapRecord> {
        let mut record = MapRecord::empty(category, folder);
        for line in self.text.split_inclusive('\n') {
            let Some(rule) = consts::RULES.iter().find(|rule| rule.matches(line)) else {
                continue;
            };
            if !is_unset(&record, rule.target) {
                tracing::debug!(field = rule.target.label(), "Ignoring repeated descriptor field");
                continue;
            }
            let value = rule.extract(line, category, options.preserve_category_newline)?;
            assign(&mut record, rule.target, value);
        }
        Ok(record)
    }
}
impl From<String> for Descriptor {
    fn from(text: String) -> Self {
        Self { text }
    }
}
impl From<&str> for Descriptor {
    fn from(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

fn is_unset(record: &MapRecord, target: Target) -> bool {
    match target {
        Target::MapType => record.map_type.is_missing(),
        Target::Name => record.name.is_missing(),
        Target::Group => record.group.is_missing(),
        Target::Priority => record.priority.is_missing(),
        Target::CategoryCode => record.category_code.is_missing(),
        Target::Publication => record.publication_code.is_missing(),
        Target::BoundingBoxMin => record.bounding_box_min.is_missing(),
        Target::BoundingBoxMax => record.bounding_box_max.is_missing(),
    }
}

fn assign(record: &mut MapRecord, target: Target, value: Value) {
    match (target, value) {
        (Target::MapType, Value::Text(s)) => record.map_type = Field::Value(s),
        (Target::Name, Value::Text(s)) => record.name = Field::Value(s),
        (Target::Group, Value::Text(s)) => record.group = Field::Value(s),
        (Target::CategoryCode, Value::Text(s)) => record.category_code = Field::Value(s),
        (Target::Publication, Value::Text(s)) => record.publication_code = Field::Value(s),
        (Target::Priority, Value::Integer(n)) => record.priority = Field::Value(n),
        (Target::BoundingBoxMin, Value::Corner(c)) => record.bounding_box_min = Field::Value(c),
        (Target::BoundingBoxMax, Value::Corner(c)) => record.bounding_box_max = Field::Value(c),
        // Each rule's extraction kind is fixed by the rule table.
        (target, value) => tracing::warn!(field = target.label(), ?value, "Rule produced mismatched value"),
    }
}
