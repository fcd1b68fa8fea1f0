use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use mapdef_extract::models::MapRecord;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const FACILITY_PREFIX: &str = "fac";

/// Facility codes whose maps are left out of the overview.
///
/// Loaded from a newline-delimited file. Entries are trimmed and blank lines
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    entries: HashSet<String>,
}
impl ExclusionList {
    /// There is no fallback list: a missing file fails the run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).or_raise(|| ErrorKind::ExclusionList(path.to_path_buf()))?;
        let list: Self = String::from_utf8_lossy(&bytes).parse()?;
        tracing::debug!(path = %path.display(), entries = list.len(), "Loaded exclusion list");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names starting with `fac`, or whose last `_` segment is a listed code.
    pub fn is_facility(&self, name: &str) -> bool {
        let suffix = name.rsplit('_').next().unwrap_or(name);
        name.starts_with(FACILITY_PREFIX) || self.entries.contains(suffix)
    }

    /// Removes facility maps in place, keeping the order of the rest.
    pub fn exclude(&self, records: &mut Vec<MapRecord>) -> usize {
        let before = records.len();
        records.retain(|record| !self.is_facility(record.name.as_str()));
        before - records.len()
    }
}
impl FromStr for ExclusionList {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.lines().collect())
    }
}
impl<S: AsRef<str>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdef_extract::models::{Category, Field};
    use rstest::rstest;

    fn list() -> ExclusionList {
        "JEPPFAC\n  HELI \n\n".parse().unwrap()
    }

    #[rstest]
    #[case("xx_JEPPFAC", true)]
    #[case("de_vfr_HELI", true)]
    #[case("facXYZ", true)]
    #[case("fac_airports", true)]
    #[case("JEPPFAC", true)]
    #[case("xx_JEPPFAC_2", false)]
    #[case("JEPPFAC_xx", false)]
    #[case("de_facilities", false)]
    #[case("xx_jeppfac", false)]
    #[case("--", false)]
    #[case("", false)]
    fn test_is_facility(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(list().is_facility(name), expected);
    }

    #[test]
    fn ignores_blank_entries() {
        let list = list();
        assert_eq!(list.len(), 2);
        // A trailing underscore leaves an empty suffix, which must not match
        // the blank line in the file.
        assert!(!list.is_facility("de_vfr_"));
    }

    #[test]
    fn excludes_in_order() {
        let mut records: Vec<_> = ["a", "xx_JEPPFAC", "b", "facXYZ", "c"]
            .into_iter()
            .map(|name| {
                let mut record = MapRecord::empty(Category::Vector, name);
                record.name = Field::Value(name.to_string());
                record
            })
            .collect();
        assert_eq!(list().exclude(&mut records), 2);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FAC_LIST.txt");
        fs::write(&path, "JEPPFAC\r\nHELI\r\n").unwrap();
        let list = ExclusionList::load(&path).unwrap();
        assert!(list.is_facility("a_HELI"));
        assert!(list.is_facility("a_JEPPFAC"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = ExclusionList::load("/definitely/not/FAC_LIST.txt").unwrap_err();
        assert!(matches!(&*err, ErrorKind::ExclusionList(_)));
    }
}
