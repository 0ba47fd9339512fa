//! Mapping between Marathon names and snapshot file-system names.
//!
//! An application ID loses its leading `/` and has every remaining `/`
//! percent-encoded, so `/group/service` is stored flat as `group%2Fservice`.
//! `%` itself is encoded too, which keeps the mapping reversible.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path};

use crate::utils::errors::{Result, SnapshotError};

/// File holding the live definition at backup time.
pub const CURRENT: &str = "current";

const NAME_ENCODE_SET: &AsciiSet = &CONTROLS.add(b'/').add(b'\\').add(b'%');

/// Which document of an application's snapshot directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKey {
    Current,
    Version(String),
}

impl SnapshotKey {
    pub fn version(version: impl Into<String>) -> Self {
        Self::Version(version.into())
    }

    pub fn file_name(&self) -> Result<String> {
        match self {
            Self::Current => Ok(CURRENT.to_string()),
            Self::Version(version) => {
                let name = encode_name(version)?;
                if name == CURRENT {
                    return Err(SnapshotError::InvalidName(version.clone()));
                }
                Ok(name)
            }
        }
    }
}

/// Directory name for an application ID.
pub fn app_dir_name(app_id: &str) -> Result<String> {
    encode_name(app_id.strip_prefix('/').unwrap_or(app_id))
        .map_err(|_| SnapshotError::InvalidName(app_id.to_string()))
}

/// Application ID for a snapshot directory, given its path relative to the root.
///
/// Works for the flat encoded layout as well as nested directories
/// (`group/service`) written by tools that used the ID as a path suffix.
pub fn app_id_from_relative(relative: &Path) -> String {
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .map(|part| percent_decode_str(&part).decode_utf8_lossy().into_owned())
        .collect();
    format!("/{}", segments.join("/"))
}

fn encode_name(raw: &str) -> Result<String> {
    let name = utf8_percent_encode(raw, NAME_ENCODE_SET).to_string();
    if name.is_empty() || name == "." || name == ".." {
        return Err(SnapshotError::InvalidName(raw.to_string()));
    }
    Ok(name)
}
