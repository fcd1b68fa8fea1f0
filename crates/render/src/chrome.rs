use crate::error::{ErrorKind, Result};
use crate::file_url;
use exn::ResultExt;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const REAP_TIMEOUT: Duration = Duration::from_secs(5);

/// Represents a Chrome/Chromium executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Chrome {
    /// A directly executable binary.
    Binary { path: PathBuf },
    /// A Flatpak-installed application.
    Flatpak { flatpak: PathBuf, app_id: String },
}
impl Chrome {
    pub(crate) fn discover() -> Result<Self> {
        let executables = [
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
            "chrome",
            "msedge",
        ];
        for exe in executables {
            if let Ok(path) = which::which(exe) {
                tracing::debug!(path = %path.display(), "Discovered Chrome executable");
                return Ok(Self::Binary { path });
            }
        }
        tracing::info!("Chrome executable not found in PATH");
        // Windows and macOS installers don't add the browser to PATH.
        if let Some(path) = install_locations(|key| std::env::var_os(key)).into_iter().find(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "Discovered Chrome in install location");
            return Ok(Self::Binary { path });
        }
        if let Ok(flatpak) = which::which("flatpak") {
            tracing::trace!(flatpak = %flatpak.display(), "Discovered Flatpak on system; searching installed apps");
            let flatpak_apps = ["com.google.Chrome", "org.chromium.Chromium"];
            for app_id in flatpak_apps {
                if Command::new(&flatpak).args(["info", app_id]).output().is_ok_and(|o| o.status.success()) {
                    return Ok(Self::Flatpak { flatpak, app_id: app_id.to_string() });
                }
            }
        } else {
            tracing::info!("Flatpak not found; skipping containerized Chrome checks.");
        }
        exn::bail!(ErrorKind::ChromeNotFound);
    }

    /// A configured executable: a bare name is searched on `PATH`, a path
    /// must exist.
    pub(crate) fn from_executable(executable: impl AsRef<Path>) -> Result<Self> {
        let executable = executable.as_ref();
        let path = which::which(executable).or_raise(|| ErrorKind::ChromeMissing(executable.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "Using configured Chrome executable");
        Ok(Self::Binary { path })
    }

    fn command(&self) -> Command {
        match self {
            Self::Binary { path } => Command::new(path),
            Self::Flatpak { flatpak, app_id } => {
                let mut command = Command::new(flatpak);
                command.arg("run").arg(app_id);
                command
            },
        }
    }

    fn arguments(input: &Path, output: &Path) -> Result<Vec<String>> {
        Ok(vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--no-pdf-header-footer".to_string(),
            // Local images (the letterhead) are referenced by file URL.
            "--allow-file-access-from-files".to_string(),
            format!("--print-to-pdf={}", output.display()),
            file_url(input)?.into(),
        ])
    }

    /// Prints the HTML document at `input` to a PDF at `output`, giving up
    /// (and killing Chrome) after `timeout`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn execute(&self, input: &Path, output: &Path, timeout: Duration) -> Result<()> {
        let mut child = self
            .command()
            .args(Self::arguments(input, output)?)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .or_raise(|| ErrorKind::Io)?;
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().or_raise(|| ErrorKind::Io)? {
                if status.success() {
                    return Ok(());
                }
                exn::bail!(ErrorKind::ChromeFailed(status.code().unwrap_or(-1)));
            }
            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        tracing::warn!(timeout = ?timeout, "Chrome timed out; killing process");
        let _ = child.kill();
        let reap_deadline = Instant::now() + REAP_TIMEOUT;
        while Instant::now() < reap_deadline {
            if matches!(child.try_wait(), Ok(Some(_)) | Err(_)) {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        exn::bail!(ErrorKind::ChromeTimeout(timeout));
    }
}

/// Where the Windows and macOS installers put Chrome, Edge and Chromium, most
/// preferred first. `env` looks up environment variables.
fn install_locations(env: impl Fn(&str) -> Option<OsString>) -> Vec<PathBuf> {
    const WINDOWS_ROOTS: [&str; 3] = ["ProgramFiles", "ProgramFiles(x86)", "LOCALAPPDATA"];
    const WINDOWS_BROWSERS: [&[&str]; 3] = [
        &["Google", "Chrome", "Application", "chrome.exe"],
        &["Chromium", "Application", "chrome.exe"],
        &["Microsoft", "Edge", "Application", "msedge.exe"],
    ];
    const MACOS_BUNDLES: [&str; 3] = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ];
    let mut locations = Vec::new();
    for browser in WINDOWS_BROWSERS {
        for root in WINDOWS_ROOTS.iter().filter_map(|key| env(key)) {
            let path = browser.iter().fold(PathBuf::from(root), |path, part| path.join(part));
            locations.push(path);
        }
    }
    if cfg!(target_os = "macos") {
        locations.extend(MACOS_BUNDLES.iter().map(PathBuf::from));
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn prints_to_requested_path() {
        let args = Chrome::arguments(Path::new("/tmp/in.html"), Path::new("/tmp/out.pdf")).unwrap();
        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--print-to-pdf=/tmp/out.pdf".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("file:///tmp/in.html"));
    }

    #[test]
    fn flatpak_runs_app() {
        let chrome = Chrome::Flatpak {
            flatpak: PathBuf::from("/usr/bin/flatpak"),
            app_id: "org.chromium.Chromium".to_string(),
        };
        let command = chrome.command();
        assert_eq!(command.get_program(), "/usr/bin/flatpak");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["run", "org.chromium.Chromium"]);
    }

    #[cfg(unix)]
    #[test]
    fn reports_failure_exit_code() {
        let chrome = Chrome::Binary { path: PathBuf::from("false") };
        let err = chrome.execute(Path::new("/in.html"), Path::new("/out.pdf"), Duration::from_secs(10)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ChromeFailed(1)));
    }

    #[test]
    fn install_locations_follow_environment() {
        let env = |key: &str| match key {
            "ProgramFiles" => Some(OsString::from("/pf")),
            "LOCALAPPDATA" => Some(OsString::from("/local")),
            _ => None,
        };
        let locations = install_locations(env);
        let chrome = PathBuf::from("/pf").join("Google").join("Chrome").join("Application").join("chrome.exe");
        let edge = PathBuf::from("/local").join("Microsoft").join("Edge").join("Application").join("msedge.exe");
        assert_eq!(locations.first(), Some(&chrome));
        assert!(locations.contains(&edge));
        // Chrome before Chromium before Edge, whatever the root.
        let position = |path: &PathBuf| locations.iter().position(|l| l == path).unwrap();
        assert!(position(&chrome) < position(&edge));
        assert_eq!(locations.iter().filter(|l| l.starts_with("/pf") || l.starts_with("/local")).count(), 6);
    }

    #[test]
    fn no_environment_no_windows_locations() {
        let locations = install_locations(|_| None);
        assert!(locations.iter().all(|l| l.starts_with("/Applications")));
    }

    #[test]
    fn configured_executable_must_exist() {
        let err = Chrome::from_executable("/definitely/not/chrome").unwrap_err();
        assert!(matches!(&*err, ErrorKind::ChromeMissing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn configured_executable_searches_path() {
        let chrome = Chrome::from_executable("true").unwrap();
        assert!(matches!(chrome, Chrome::Binary { path } if path.is_absolute()));
    }
}
