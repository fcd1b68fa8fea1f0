use crate::scan::LabelFiles;
use crate::scan::error::{ErrorKind, Result};
use exn::ResultExt;
use mapdef_extract::error::ErrorKind as ExtractErrorKind;
use mapdef_extract::models::{Category, MapRecord};
use mapdef_extract::{DESCRIPTOR_FILE, ParseOptions, extract};
use std::fs;
use std::path::{Path, PathBuf};

/// What the immediate children of a map folder tell us.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Contents {
    /// One subdirectory per level of detail. Symlinked directories count.
    pub level_of_detail_count: usize,
    pub descriptor: Option<PathBuf>,
}

/// Lists the immediate children of a candidate map folder.
pub(crate) fn inspect(path: &Path) -> Result<Contents> {
    let mut contents = Contents::default();
    for entry in fs::read_dir(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))? {
        let entry = entry.or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        let child = entry.path();
        if child.is_dir() {
            contents.level_of_detail_count += 1;
        } else if entry.file_name() == DESCRIPTOR_FILE && child.is_file() {
            contents.descriptor = Some(child);
        }
    }
    Ok(contents)
}

/// Scans a single candidate map folder.
///
/// Returns `Ok(None)` for folders without a descriptor file; those are not
/// maps.
pub(crate) fn scan_candidate(
    path: &Path,
    category: Category,
    labels: &LabelFiles,
    options: ParseOptions,
) -> Result<Option<MapRecord>> {
    let contents = inspect(path)?;
    let Some(descriptor) = contents.descriptor else {
        return Ok(None);
    };
    let folder = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    let record = extract(&descriptor, category, &folder, options).map_err(|err| {
        let kind = match &*err {
            ExtractErrorKind::ParseError { .. } => ErrorKind::Malformed {
                path: descriptor.clone(),
                detail: (*err).to_string(),
            },
            ExtractErrorKind::Unreadable(_) => ErrorKind::Unreadable(descriptor.clone()),
        };
        err.raise(kind)
    })?;
    Ok(Some(
        record
            .with_level_of_detail_count(contents.level_of_detail_count)
            .with_label_index(labels.presence(category, &folder)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdef_extract::models::{Field, LabelIndex};

    fn map_folder(root: &Path, name: &str, descriptor: Option<&str>, lods: usize) -> PathBuf {
        let path = root.join(name);
        fs::create_dir(&path).unwrap();
        for lod in 0..lods {
            fs::create_dir(path.join(format!("lod{lod}"))).unwrap();
        }
        if let Some(descriptor) = descriptor {
            fs::write(path.join(DESCRIPTOR_FILE), descriptor).unwrap();
        }
        path
    }

    #[test]
    fn counts_levels_of_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_folder(dir.path(), "de_vfr", Some("name de_vfr\n"), 3);
        fs::write(path.join("notes.txt"), "").unwrap();
        let contents = inspect(&path).unwrap();
        assert_eq!(contents.level_of_detail_count, 3);
        assert_eq!(contents.descriptor, Some(path.join(DESCRIPTOR_FILE)));
    }

    #[test]
    fn builds_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_folder(dir.path(), "de_vfr", Some("type vfr\nname de_vfr_1\npriority 10\n"), 2);
        let labels: LabelFiles = ["DE_VFR.sql"].into_iter().collect();
        let record = scan_candidate(&path, Category::Vector, &labels, ParseOptions::default()).unwrap().unwrap();
        assert_eq!(record.folder, "de_vfr");
        assert_eq!(record.name.as_str(), "de_vfr_1");
        assert_eq!(record.priority, Field::Value(10));
        assert_eq!(record.level_of_detail_count, 2);
        assert_eq!(record.has_label_index, LabelIndex::Yes);
    }

    #[test]
    fn no_descriptor_is_not_a_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_folder(dir.path(), "fonts", None, 1);
        let record = scan_candidate(&path, Category::Vector, &LabelFiles::default(), ParseOptions::default()).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn nested_descriptor_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_folder(dir.path(), "deep", None, 1);
        fs::write(path.join("lod0").join(DESCRIPTOR_FILE), "name deep\n").unwrap();
        assert_eq!(inspect(&path).unwrap().descriptor, None);
    }

    #[test]
    fn malformed_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = map_folder(dir.path(), "broken", Some("priority high\n"), 0);
        let err = scan_candidate(&path, Category::Raster, &LabelFiles::default(), ParseOptions::default()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Malformed { .. }));
    }

    #[test]
    fn plain_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stray.txt");
        fs::write(&path, "").unwrap();
        let err = scan_candidate(&path, Category::Terrain, &LabelFiles::default(), ParseOptions::default()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Unreadable(_)));
    }
}
