use mapdef_extract::models::{Category, LabelIndex};
use std::fs;
use std::path::Path;

/// File names found in the label-index (`SQL`) folder.
///
/// Label data for a map is recognised purely by name: a label file belongs to
/// a map when the file name contains a marker derived from the map's folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFiles {
    names: Vec<String>,
}
impl LabelFiles {
    /// Lists the label folder once. Entries that aren't valid UTF-8 can never
    /// match an (upper-cased, UTF-8) marker, so they are dropped.
    pub fn load(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let names = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether label data exists for the map stored in `folder`.
    pub fn presence(&self, category: Category, folder: &str) -> LabelIndex {
        let marker = marker(category, folder);
        LabelIndex::from_count(self.names.iter().filter(|name| name.contains(&marker)).count())
    }
}
impl<S: Into<String>> FromIterator<S> for LabelFiles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { names: iter.into_iter().map(Into::into).collect() }
    }
}

/// Jeppesen and reporting-point vector maps share label files whose names
/// don't follow the folder name.
fn marker(category: Category, folder: &str) -> String {
    if category == Category::Vector {
        let lower = folder.to_lowercase();
        if lower.contains("jepp") {
            return "JEPP".to_string();
        }
        if lower.contains("reppts") {
            return "REPORTINGPOINTS".to_string();
        }
    }
    folder.to_uppercase()
}
