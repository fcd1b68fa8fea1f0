//! CSS style management for rendered documents.
//!
//! Styles are assembled through [`StyleConfig`]'s builder API, combining
//! compile-time embedded builtins (`report.css`) with
//! user-provided files or raw CSS content. All styles are read eagerly at
//! construction time so that missing files fail fast rather than at render time.

mod assets;

use crate::error::{ErrorKind, Result};
use crate::style::assets::Builtins;
use exn::ResultExt;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

struct Style {
    content: Cow<'static, [u8]>,
}
impl Style {
    fn write_all_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_all(b"<style>")?;
        w.write_all(&self.content)?;
        w.write_all(b"</style>\n")
    }
}

/// An ordered collection of CSS stylesheets to inject into rendered documents.
///
/// Styles are applied in insertion order; later styles override earlier ones.
///
/// # Example
///
/// ```no_run
/// use mapdef_render::StyleConfig;
/// # use mapdef_render::error::Result;
///
/// # fn get_styles() -> Result<StyleConfig> {
/// let styles = StyleConfig::new()
///     .with_builtin("report.css")?
///     .with_file("/path/to/custom.css")?;
/// # Ok(styles)
/// # }
/// ```
#[derive(Default)]
pub struct StyleConfig {
    styles: Vec<Style>,
}
impl StyleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from a list of names, each either a builtin
    /// stylesheet or a path to a CSS file.
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        names.into_iter().try_fold(Self::new(), |config, name| {
            let name = name.as_ref();
            if Builtins::exists(name) { config.with_builtin(name) } else { config.with_file(name) }
        })
    }

    /// Appends a builtin stylesheet by name.
    ///
    /// Returns [`ErrorKind::AssetNotFound`](crate::error::ErrorKind::AssetNotFound)
    /// if `name` does not match any embedded asset.
    pub fn with_builtin(mut self, name: impl AsRef<str>) -> Result<Self> {
        let content = Builtins::load(name)?;
        self.styles.push(Style { content });
        Ok(self)
    }

    /// Appends a stylesheet read from a file on disk.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::AssetNotFound(path.display().to_string()));
        }
        let content = fs::read(path).or_raise(|| ErrorKind::Io)?;
        self.styles.push(Style { content: Cow::Owned(content) });
        Ok(self)
    }

    /// Appends raw CSS content as a stylesheet. This is infallible since no
    /// I/O is involved.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.styles.push(Style { content: Cow::Owned(content.into().into_bytes()) });
        self
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub(crate) fn write_all_to(&self, w: &mut impl Write) -> std::io::Result<usize> {
        for style in &self.styles {
            style.write_all_to(w)?;
        }
        Ok(self.styles.len())
    }
}
