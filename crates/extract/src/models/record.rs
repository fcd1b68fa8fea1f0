use super::{Category, Field, LabelIndex};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A bounding-box corner, rounded to two decimal places on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}
impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: round2(x), y: round2(y) }
    }
}
impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Rounds the exact binary value half-to-even: `2.675` is stored just below
/// the half and becomes `2.67`, while the exact tie `0.125` becomes `0.12`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Metadata for a single map folder that contained a descriptor file.
///
/// Records are only ever created from a descriptor; a map folder without one
/// contributes nothing to a report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapRecord {
    /// The category folder the map was found in.
    pub category: Category,
    /// Name of the map folder itself (not the descriptor's `name`).
    pub folder: String,
    pub map_type: Field<String>,
    pub name: Field<String>,
    pub group: Field<String>,
    pub priority: Field<i64>,
    /// The descriptor's own `category` line, free text.
    pub category_code: Field<String>,
    pub publication_code: Field<String>,
    pub bounding_box_min: Field<Coordinate>,
    pub bounding_box_max: Field<Coordinate>,
    /// Immediate subdirectories of the map folder, one per level of detail.
    pub level_of_detail_count: usize,
    pub has_label_index: LabelIndex,
}
impl MapRecord {
    /// A record with every descriptor field missing.
    pub fn empty(category: Category, folder: impl Into<String>) -> Self {
        Self {
            category,
            folder: folder.into(),
            map_type: Field::Missing,
            name: Field::Missing,
            group: Field::Missing,
            priority: Field::Missing,
            category_code: Field::Missing,
            publication_code: Field::Missing,
            bounding_box_min: Field::Missing,
            bounding_box_max: Field::Missing,
            level_of_detail_count: 0,
            has_label_index: LabelIndex::Unknown,
        }
    }

    pub fn with_level_of_detail_count(mut self, count: usize) -> Self {
        self.level_of_detail_count = count;
        self
    }

    pub fn with_label_index(mut self, index: LabelIndex) -> Self {
        self.has_label_index = index;
        self
    }
}
impl AsRef<MapRecord> for MapRecord {
    fn as_ref(&self) -> &MapRecord {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((10.1234, 20.5678), (10.12, 20.57))]
    #[case((-3.005, 0.0), (-3.0, 0.0))]
    #[case((179.999, -89.994), (180.0, -89.99))]
    #[case((10.625, 0.125), (10.62, 0.12))]
    #[case((52.345, 8.125), (52.34, 8.12))]
    #[case((2.675, 47.875), (2.67, 47.88))]
    #[case((1.375, -1.375), (1.38, -1.38))]
    fn test_coordinate_rounding(#[case] input: (f64, f64), #[case] expected: (f64, f64)) {
        let coordinate = Coordinate::from(input);
        assert_eq!((coordinate.x, coordinate.y), expected);
    }

    #[test]
    fn empty_record_has_placeholders() {
        let record = MapRecord::empty(Category::Raster, "de_50k");
        assert_eq!(record.name.to_string(), "--");
        assert_eq!(record.priority.to_string(), "--");
        assert_eq!(record.bounding_box_min.to_string(), "--");
        assert_eq!(record.folder, "de_50k");
    }
}
