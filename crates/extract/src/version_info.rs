//! Display name lookup from a disk's version-info file (`EuroNavMedia.ini`).

use std::fs;
use std::path::Path;
use tracing::instrument;

/// Default file holding the display name, relative to the database root.
pub const VERSION_INFO_FILE: &str = "EuroNavMedia.ini";
/// Key whose line carries the display name.
pub const DISPLAY_NAME_KEY: &str = "EAM_Name";
/// Shown when the version-info file or its key is absent.
pub const FALLBACK_DISPLAY_NAME: &str = "X.XX.XX";

/// Where to look for the display name and what to use when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub file_name: String,
    pub key: String,
    pub fallback: String,
}
impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            file_name: VERSION_INFO_FILE.to_string(),
            key: DISPLAY_NAME_KEY.to_string(),
            fallback: FALLBACK_DISPLAY_NAME.to_string(),
        }
    }
}
impl VersionInfo {
    /// Reads the display name below `root`.
    ///
    /// The first line starting with the key yields everything after the key
    /// and one separator character (`EAM_Name=1.23.45` → `1.23.45`). This
    /// never fails: an unreadable file or a missing key yields the fallback.
    ///
    /// Only lines that begin with the key count, and the earliest one wins.
    /// Older report scripts took the last line mentioning the key anywhere,
    /// so a file repeating `EAM_Name` or quoting it in a comment can name a
    /// disk differently here.
    #[instrument(level = "debug", skip(self), fields(file = %self.file_name))]
    pub fn display_name(&self, root: impl AsRef<Path> + std::fmt::Debug) -> String {
        let path = root.as_ref().join(&self.file_name);
        let contents = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "Version info unavailable; using fallback");
                return self.fallback.clone();
            },
        };
        self.parse(&contents).unwrap_or_else(|| {
            tracing::debug!(key = %self.key, "Display name key not found; using fallback");
            self.fallback.clone()
        })
    }

    fn parse(&self, contents: &str) -> Option<String> {
        let skip = self.key.chars().count() + 1;
        contents
            .lines()
            .find(|line| line.starts_with(self.key.as_str()))
            .map(|line| line.chars().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[General]\nEAM_Name=7.01.02\nOther=1\n", "7.01.02")]
    #[case("EAM_Name 2.3\r\n", "2.3")]
    #[case("EAM_Name=first\nEAM_Name=second\n", "first")]
    #[case("; set EAM_Name below\nEAM_Name=7.02\n", "7.02")]
    #[case("EAM_Name=", "")]
    fn test_reads_display_name(#[case] contents: &str, #[case] expected: &str) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VERSION_INFO_FILE), contents).unwrap();
        assert_eq!(VersionInfo::default().display_name(dir.path()), expected);
    }

    #[test]
    fn missing_file_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(VersionInfo::default().display_name(dir.path()), FALLBACK_DISPLAY_NAME);
    }

    #[test]
    fn missing_key_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VERSION_INFO_FILE), "Version=1\n").unwrap();
        let info = VersionInfo { fallback: "unknown".to_string(), ..Default::default() };
        assert_eq!(info.display_name(dir.path()), "unknown");
    }
}
