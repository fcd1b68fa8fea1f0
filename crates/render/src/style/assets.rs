//! Embedded assets for rendering.
//!
//! This module provides access to CSS styles that are embedded into the
//! binary at compile time using [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::Embed;
use std::borrow::Cow;

#[derive(Embed)]
#[folder = "../../assets/styles/"]
pub struct Builtins;
impl Builtins {
    /// Get the CSS content for a builtin style by name.
    pub fn load(name: impl AsRef<str>) -> Result<Cow<'static, [u8]>> {
        Self::get(Self::name(&name)).map(|f| f.data).ok_or_raise(|| ErrorKind::AssetNotFound(Self::identifier(name)))
    }

    pub fn exists(name: impl AsRef<str>) -> bool {
        Self::get(Self::name(&name)).is_some()
    }

    /// Builtins may be referred to as `report.css` or `builtin:report.css`.
    fn name(name: &impl AsRef<str>) -> &str {
        name.as_ref().trim().trim_start_matches("builtin:")
    }

    pub(crate) fn identifier(name: impl AsRef<str>) -> String {
        format!("builtin:{}", Self::name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_load_report_style() {
        let css = Builtins::load("report.css");
        assert!(css.is_ok());
        assert!(!css.unwrap().is_empty());
        assert!(Builtins::exists("builtin:report.css"));
    }

    #[test]
    fn unknown_builtin() {
        let err = Builtins::load("missing.css").unwrap_err();
        assert!(matches!(&*err, ErrorKind::AssetNotFound(id) if id == "builtin:missing.css"));
    }
}
