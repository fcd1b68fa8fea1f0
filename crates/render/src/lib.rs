mod chrome;
pub mod error;
mod render;
#[cfg(feature = "table")]
pub mod report;
mod style;

use crate::chrome::Chrome;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
#[cfg(feature = "table")]
pub use crate::report::ReportDocument;
pub use crate::style::StyleConfig;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub type TempFile = tempfile::NamedTempFile;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Renderer {
    chrome: Chrome,
    styles: StyleConfig,
    timeout: Duration,
}
impl Renderer {
    /// Uses the first Chrome, Chromium or Edge found on the system: on `PATH`,
    /// then in the usual install locations, then as a Flatpak app.
    pub fn new(styles: StyleConfig) -> Result<Self> {
        Ok(Self { chrome: Chrome::discover()?, styles, timeout: DEFAULT_TIMEOUT })
    }

    /// Uses `executable` instead of searching. A bare name is looked up on
    /// `PATH`; anything else must point at an existing executable.
    pub fn with_executable(styles: StyleConfig, executable: impl AsRef<Path>) -> Result<Self> {
        Ok(Self { chrome: Chrome::from_executable(executable)?, styles, timeout: DEFAULT_TIMEOUT })
    }

    /// How long a single Chrome invocation may take before it is killed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A `file://` URL for a local path. Relative paths are resolved against the
/// working directory first.
pub fn file_url(path: impl AsRef<Path>) -> Result<Url> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).or_raise(|| ErrorKind::NotAFilePath(path.to_path_buf()))?;
    match Url::from_file_path(&absolute) {
        Ok(url) => Ok(url),
        Err(()) => exn::bail!(ErrorKind::NotAFilePath(absolute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[cfg(unix)]
    #[rstest]
    #[case("/tmp/report.html", "file:///tmp/report.html")]
    #[case("/srv/My Maps/Logo.png", "file:///srv/My%20Maps/Logo.png")]
    #[case("/tmp/a#b?c%d", "file:///tmp/a%23b%3Fc%25d")]
    #[case("/tmp/ü", "file:///tmp/%C3%BC")]
    fn test_file_url(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(file_url(path).unwrap().as_str(), expected);
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = file_url("Logo.png").unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().starts_with('/'));
        assert!(url.path().ends_with("/Logo.png"));
    }

    #[cfg(windows)]
    #[test]
    fn unc_paths_keep_their_host() {
        let url = file_url(r"\\srv\maps\Logo.png").unwrap();
        assert_eq!(url.as_str(), "file://srv/maps/Logo.png");
    }
}
