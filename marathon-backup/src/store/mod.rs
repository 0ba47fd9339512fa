//! Snapshot storage.
//!
//! On disk a backup root looks like:
//!
//! ```text
//! <root>/<encoded-app-id>/current       live definition at backup time
//! <root>/<encoded-app-id>/<version>     one file per historical version
//! ```
//!
//! The engine only talks to [`SnapshotStore`]; [`FsSnapshotStore`] is the
//! directory-tree implementation.

pub mod fs;
pub mod layout;
pub mod walker;

pub use layout::SnapshotKey;
pub use walker::{DirFailure, SnapshotDir, WalkItem};

use std::path::PathBuf;

use crate::config::SnapshotConfig;
use crate::utils::errors::{Result, SnapshotError};

/// Keyed storage of application documents: (application, current-or-version) -> bytes.
pub trait SnapshotStore {
    /// Make the store ready for writing.
    fn prepare(&self) -> Result<()>;

    /// Store one document, subject to the store's overwrite policy.
    /// Returns where it was written.
    fn put(&self, app_id: &str, key: &SnapshotKey, document: &[u8]) -> Result<PathBuf>;

    /// Read one document from a snapshot directory.
    fn get(&self, dir: &SnapshotDir, key: &SnapshotKey) -> Result<Vec<u8>>;

    /// Every application snapshot held by the store, discovered lazily.
    ///
    /// Fails only when the store itself cannot be listed; a single
    /// unreadable directory is yielded as a [`DirFailure`].
    fn list_apps(&self) -> Result<Box<dyn Iterator<Item = WalkItem> + '_>>;

    /// Location of an application's snapshot directory.
    fn snapshot_dir(&self, app_id: &str) -> Result<SnapshotDir>;
}

/// Directory-tree snapshot store rooted at one path.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
    overwrite: bool,
}

impl FsSnapshotStore {
    pub fn new(root: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            root: root.into(),
            overwrite,
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(config.root.clone(), config.force)
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn prepare(&self) -> Result<()> {
        fs::ensure_directory(&self.root)
    }

    fn put(&self, app_id: &str, key: &SnapshotKey, document: &[u8]) -> Result<PathBuf> {
        let dir = self.snapshot_dir(app_id)?;
        fs::ensure_directory(&dir.path)?;

        let path = dir.path.join(key.file_name()?);
        fs::write_file(&path, document, self.overwrite)?;
        Ok(path)
    }

    fn get(&self, dir: &SnapshotDir, key: &SnapshotKey) -> Result<Vec<u8>> {
        fs::read_file(&dir.path.join(key.file_name()?))
    }

    fn list_apps(&self) -> Result<Box<dyn Iterator<Item = WalkItem> + '_>> {
        if !self.root.is_dir() {
            return Err(SnapshotError::NotFound(self.root.clone()));
        }
        // An unreadable root is fatal; anything below it is reported per directory.
        std::fs::read_dir(&self.root).map_err(|e| SnapshotError::io(&self.root, e))?;

        Ok(Box::new(walker::list_snapshot_directories(&self.root)))
    }

    fn snapshot_dir(&self, app_id: &str) -> Result<SnapshotDir> {
        let relative_path = PathBuf::from(layout::app_dir_name(app_id)?);
        Ok(SnapshotDir {
            path: self.root.join(&relative_path),
            relative_path,
        })
    }
}
