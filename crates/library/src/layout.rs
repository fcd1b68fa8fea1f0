//! Folder layout detection for database disks.
//!
//! Older disks keep the category folders directly under the database root
//! (*flat*); newer ones nest them under `data/` (*nested*).

use mapdef_extract::models::Category;
use std::path::{Path, PathBuf};

const DATA_DIR: &str = "data";
const LABEL_DIR: &str = "SQL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// `root/vector`, `root/raster`, `root/terrain`, `root/SQL`
    Flat,
    /// `root/data/vector`, `root/data/raster`, `root/data/terrain`, `root/data/SQL`
    Nested,
}

/// Resolved folder paths for one database root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    kind: LayoutKind,
}
impl Layout {
    /// Any category folder directly under `root` means a flat layout;
    /// otherwise the nested layout is assumed without checking it exists.
    /// A missing folder simply scans as an empty category.
    pub fn detect(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let flat = Category::ALL.iter().any(|c| root.join(c.folder_name()).exists());
        let kind = if flat { LayoutKind::Flat } else { LayoutKind::Nested };
        tracing::debug!(root = %root.display(), ?kind, "Detected database layout");
        Self { root, kind }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// The folder holding the category and label-index folders.
    pub fn data_root(&self) -> PathBuf {
        match self.kind {
            LayoutKind::Flat => self.root.clone(),
            LayoutKind::Nested => self.root.join(DATA_DIR),
        }
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.data_root().join(category.folder_name())
    }

    pub fn label_dir(&self) -> PathBuf {
        self.data_root().join(LABEL_DIR)
    }
}
