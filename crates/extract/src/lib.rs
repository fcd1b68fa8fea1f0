mod consts;
pub mod descriptor;
pub mod error;
pub mod models;
mod version_info;

use std::path::Path;
use tracing::instrument;

pub use crate::consts::{DESCRIPTOR_FILE, PLACEHOLDER};
pub use crate::descriptor::{Descriptor, ParseOptions};
use crate::error::Result;
use crate::models::{Category, MapRecord};
pub use crate::version_info::{DISPLAY_NAME_KEY, FALLBACK_DISPLAY_NAME, VERSION_INFO_FILE, VersionInfo};

/// Easy, top-level entrypoint: reads the descriptor at `path` and extracts a
/// [`MapRecord`] for the map folder `folder` of `category`.
///
/// Level-of-detail count and label-index presence are properties of the map
/// folder rather than the descriptor, so they are left at their defaults for
/// the caller to fill in.
#[instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn extract(path: impl AsRef<Path>, category: Category, folder: &str, options: ParseOptions) -> Result<MapRecord> {
    Descriptor::from_path(path)?.record(category, folder, options)
}
