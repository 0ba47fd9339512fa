//! File operations for snapshot directories.
//!
//! Writes go through a temp file in the destination directory followed by a
//! rename, so a snapshot file is either complete or absent.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::utils::errors::{Result, SnapshotError};

/// Create `path` and any missing parents. An existing directory is fine.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SnapshotError::io(path, e))
}

/// Write `data` to `path`.
///
/// Fails with [`SnapshotError::Conflict`] when `path` exists and `overwrite`
/// is false; the existing file is left untouched.
pub fn write_file(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    info!(path = %path.display(), "Writing to {}", path.display());

    if !overwrite && path.exists() {
        return Err(SnapshotError::Conflict(path.to_path_buf()));
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = write_synced(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(SnapshotError::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SnapshotError::io(path, e)
    })?;

    debug!(path = %path.display(), bytes = data.len(), "Snapshot file written");
    Ok(())
}

/// Read a whole snapshot file.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SnapshotError::NotFound(path.to_path_buf()),
        _ => SnapshotError::io(path, e),
    })
}

/// Hidden sibling of `path`, unique per write.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple()))
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
