use crate::descriptor::{Extraction, FieldRule, Newline, Target};

/// Displayed in place of any field a descriptor does not provide.
pub const PLACEHOLDER: &str = "--";

/// File name marking a map folder as a map: its descriptor.
pub const DESCRIPTOR_FILE: &str = "map.def";

macro_rules! text {
    ($keyword:literal, $target:ident, $offset:literal, $newline:ident) => {
        FieldRule {
            keyword: $keyword,
            target: Target::$target,
            extraction: Extraction::Text { offset: $offset, newline: Newline::$newline },
        }
    };
}

/// Descriptor lines are matched against these rules in order; the first rule
/// whose keyword occurs anywhere in the line claims it. Offsets are counted
/// in characters from the start of the line (keyword plus one separator).
pub(crate) static RULES: &[FieldRule] = &[
    text!("type", MapType, 5, Strip),
    text!("name", Name, 5, Strip),
    text!("group", Group, 6, Strip),
    FieldRule {
        keyword: "priority",
        target: Target::Priority,
        extraction: Extraction::Integer { offset: 9 },
    },
    // Historically vector descriptors kept the trailing newline on this field
    // while raster and terrain did not. Only honoured when explicitly asked for.
    text!("category", CategoryCode, 9, KeepForVector),
    text!("publication", Publication, 12, Strip),
    FieldRule {
        keyword: "bbmin",
        target: Target::BoundingBoxMin,
        extraction: Extraction::Corner,
    },
    FieldRule {
        keyword: "bbmax",
        target: Target::BoundingBoxMax,
        extraction: Extraction::Corner,
    },
];
