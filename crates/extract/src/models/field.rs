use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::consts::PLACEHOLDER;

/// A descriptor value that may be absent.
///
/// Descriptors are loosely structured, so any field can be missing. Missing
/// fields are never null: they display as the [`PLACEHOLDER`] (`--`), which
/// is what ends up in every report cell and CSV column.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Value(T),
    Missing,
}
impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}
impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Value(v) => Field::Value(f(v)),
            Self::Missing => Field::Missing,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Value(v) => Field::Value(v),
            Self::Missing => Field::Missing,
        }
    }
}
impl Field<String> {
    /// The value as a string slice, or the placeholder when missing.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(v) => v.as_str(),
            Self::Missing => PLACEHOLDER,
        }
    }
}
impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}
impl<T> From<Field<T>> for Option<T> {
    fn from(value: Field<T>) -> Self {
        match value {
            Field::Value(v) => Some(v),
            Field::Missing => None,
        }
    }
}
impl<T: Display> Display for Field<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Value(v) => v.fmt(f),
            Self::Missing => f.write_str(PLACEHOLDER),
        }
    }
}
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Field<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Missing => serializer.serialize_str(PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_displays_placeholder() {
        assert_eq!(Field::<i64>::Missing.to_string(), "--");
        assert_eq!(Field::<String>::Missing.as_str(), "--");
        assert_eq!(Field::Value(42).to_string(), "42");
    }

    #[test]
    fn converts_from_option() {
        assert_eq!(Field::from(Some("x".to_string())), Field::Value("x".to_string()));
        assert!(Field::<u8>::from(None).is_missing());
        assert_eq!(Option::<u8>::from(Field::Value(3)), Some(3));
    }
}
