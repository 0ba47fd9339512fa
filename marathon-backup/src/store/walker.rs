//! Discovery of snapshot directories under a backup root.
//!
//! A snapshot directory is any directory holding a regular file named
//! `current`. Discovery is recursive so older nested layouts are found too.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::layout::{app_id_from_relative, CURRENT};
use crate::utils::errors::SnapshotError;

/// A directory holding one application's snapshot files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDir {
    /// Full path to the directory
    pub path: PathBuf,

    /// Path relative to the backup root
    pub relative_path: PathBuf,
}

impl SnapshotDir {
    fn under(root: &Path, path: PathBuf) -> Self {
        let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self {
            path,
            relative_path,
        }
    }

    /// Application ID implied by the directory name. The `id` inside the
    /// `current` document is authoritative; this is for reporting.
    pub fn app_id_hint(&self) -> String {
        app_id_from_relative(&self.relative_path)
    }

    pub fn current_path(&self) -> PathBuf {
        self.path.join(CURRENT)
    }
}

/// A directory the walk could not read. The rest of the tree is still walked.
#[derive(Debug)]
pub struct DirFailure {
    pub dir: SnapshotDir,
    pub error: SnapshotError,
}

pub type WalkItem = std::result::Result<SnapshotDir, DirFailure>;

/// Lazily walk `root`, yielding every snapshot directory in file-name order.
///
/// Symlinks are not followed and depth is unlimited. Re-walking an
/// unchanged tree yields the same sequence.
pub fn list_snapshot_directories(root: &Path) -> impl Iterator<Item = WalkItem> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if is_current_file(&entry) => {
                let dir = entry.path().parent()?.to_path_buf();
                Some(Ok(SnapshotDir::under(root, dir)))
            }
            Ok(_) => None,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let error = SnapshotError::io(&path, e.into());
                Some(Err(DirFailure {
                    dir: SnapshotDir::under(root, path),
                    error,
                }))
            }
        })
}

fn is_current_file(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_file() && entry.file_name() == CURRENT
}
