//! Layered configuration for a mapdef run.
//!
//! Values are merged in increasing priority:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. Either an explicitly given file, or `config.toml`, `config.yaml` and
//!    `config.json` from the platform configuration directory
//!    (e.g. `~/.config/mapdef/` on Linux).
//! 3. `MAPDEF_`-prefixed environment variables, with `__` separating nested
//!    keys (`MAPDEF_REPORT__ROWS_PER_PAGE=25`).
//!
//! The resulting [`Config`] is passed explicitly to every component; nothing
//! here is global.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use mapdef_extract::{DISPLAY_NAME_KEY, FALLBACK_DISPLAY_NAME, ParseOptions, VERSION_INFO_FILE, VersionInfo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "MAPDEF_";
const EXCLUSION_LIST_FILE: &str = "FAC_LIST.txt";
const LOGO_FILE: &str = "Logo.png";
pub const DEFAULT_ROWS_PER_PAGE: usize = 20;
pub const DEFAULT_FILE_NAME_TEMPLATE: &str = "{{ kind }}_{{ name|filename }}_{{ timestamp }}";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[hour]_[minute]_[second]";
pub const DEFAULT_STYLE: &str = "report.css";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Newline-delimited list of facility codes excluded from the overview.
    pub exclusion_list: PathBuf,
    /// Letterhead image shown on the title page of each report.
    pub logo: Option<PathBuf>,
    pub version_info: VersionInfoConfig,
    pub parse: ParseConfig,
    pub report: ReportConfig,
}
impl Default for Config {
    fn default() -> Self {
        let dir = program_dir();
        Self {
            exclusion_list: dir.join(EXCLUSION_LIST_FILE),
            logo: Some(dir.join(LOGO_FILE)),
            version_info: VersionInfoConfig::default(),
            parse: ParseConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfoConfig {
    pub file: String,
    pub key: String,
    pub fallback: String,
}
impl Default for VersionInfoConfig {
    fn default() -> Self {
        Self {
            file: VERSION_INFO_FILE.to_string(),
            key: DISPLAY_NAME_KEY.to_string(),
            fallback: FALLBACK_DISPLAY_NAME.to_string(),
        }
    }
}
impl From<&VersionInfoConfig> for VersionInfo {
    fn from(config: &VersionInfoConfig) -> Self {
        VersionInfo {
            file_name: config.file.clone(),
            key: config.key.clone(),
            fallback: config.fallback.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Abort the run on a malformed numeric descriptor field instead of
    /// skipping that map.
    pub strict: bool,
    /// Keep the trailing newline on the `category` field of vector maps.
    pub preserve_category_newline: bool,
}
impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions { preserve_category_newline: config.preserve_category_newline }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub rows_per_page: usize,
    /// [upon](https://docs.rs/upon) template for output file names, without extension.
    pub file_name: String,
    /// [`time`](https://docs.rs/time) format description for `{{ timestamp }}`.
    pub timestamp_format: String,
    /// Builtin stylesheet names or paths to CSS files, applied in order.
    pub styles: Vec<String>,
    /// Chrome, Chromium or Edge executable used for printing. Searched for
    /// when unset; a bare name is looked up on `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome: Option<PathBuf>,
    pub chrome_timeout_secs: u64,
}
impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            file_name: DEFAULT_FILE_NAME_TEMPLATE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            styles: vec![DEFAULT_STYLE.to_string()],
            chrome: None,
            chrome_timeout_secs: 120,
        }
    }
}

impl Config {
    /// Loads the layered configuration. An explicit `path` replaces the
    /// per-user configuration files and must exist.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) => figment = merge_file(figment, path)?,
            None => {
                if let Some(dirs) = ProjectDirs::from("", "", "mapdef") {
                    let dir = dirs.config_dir();
                    tracing::trace!(dir = %dir.display(), "Looking for user configuration");
                    figment = figment
                        .merge(Toml::file(dir.join("config.toml")))
                        .merge(Yaml::file(dir.join("config.yaml")))
                        .merge(Json::file(dir.join("config.json")));
                }
            },
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from an arbitrary [`Figment`].
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = match figment.extract() {
            Ok(config) => config,
            Err(err) => exn::bail!(ErrorKind::Invalid(err.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.rows_per_page == 0 {
            exn::bail!(ErrorKind::Invalid("report.rows_per_page must be at least 1".to_string()));
        }
        if self.report.chrome_timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("report.chrome_timeout_secs must be at least 1".to_string()));
        }
        if self.report.file_name.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("report.file_name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn version_info(&self) -> VersionInfo {
        (&self.version_info).into()
    }

    pub fn parse_options(&self) -> ParseOptions {
        (&self.parse).into()
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}

/// Directory of the running executable; auxiliary inputs live alongside it.
fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn defaults_are_valid() {
        let config = Config::from_figment(Figment::from(Serialized::defaults(Config::default()))).unwrap();
        assert_eq!(config.report.rows_per_page, DEFAULT_ROWS_PER_PAGE);
        assert!(config.exclusion_list.ends_with(EXCLUSION_LIST_FILE));
        assert_eq!(config.version_info(), VersionInfo::default());
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[rstest]
    #[case("config.toml", "exclusion_list = \"/srv/fac.txt\"\n[report]\nrows_per_page = 25\n")]
    #[case("config.yaml", "exclusion_list: /srv/fac.txt\nreport:\n  rows_per_page: 25\n")]
    #[case("config.json", r#"{"exclusion_list": "/srv/fac.txt", "report": {"rows_per_page": 25}}"#)]
    fn test_loads_explicit_file(#[case] name: &str, #[case] contents: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        let figment = merge_file(Figment::from(Serialized::defaults(Config::default())), &path).unwrap();
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.exclusion_list, PathBuf::from("/srv/fac.txt"));
        assert_eq!(config.report.rows_per_page, 25);
        // Untouched sections keep their defaults.
        assert_eq!(config.report.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "").unwrap();
        let err = merge_file(Figment::new(), &path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_zero_rows_per_page() {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string("[report]\nrows_per_page = 0"));
        let err = Config::from_figment(figment).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)));
    }

    #[test]
    fn chrome_override() {
        let defaults = Figment::from(Serialized::defaults(Config::default()));
        assert_eq!(Config::from_figment(defaults.clone()).unwrap().report.chrome, None);
        let figment = defaults.merge(Toml::string(
            "[report]\nchrome = 'C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe'",
        ));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(
            config.report.chrome,
            Some(PathBuf::from("C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe"))
        );
    }

    #[test]
    fn converts_parse_options() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("[parse]\nstrict = true\npreserve_category_newline = true"));
        let config = Config::from_figment(figment).unwrap();
        assert!(config.parse.strict);
        assert!(config.parse_options().preserve_category_newline);
    }
}
