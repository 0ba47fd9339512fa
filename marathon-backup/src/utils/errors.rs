//! Custom error types for snapshot and restore runs.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data already saved at {} (use --force to overwrite)", .0.display())]
    Conflict(PathBuf),

    #[error("Snapshot not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed snapshot {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Marathon error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Orchestrator { status: Option<u16>, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid snapshot name: {0:?}")]
    InvalidName(String),

    #[error("Application {app_id}: {source}")]
    Application {
        app_id: String,
        #[source]
        source: Box<SnapshotError>,
    },
}

impl SnapshotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the application ID a failure belongs to.
    pub fn for_application(self, app_id: impl Into<String>) -> Self {
        match self {
            Self::Application { .. } => self,
            other => Self::Application {
                app_id: app_id.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error with any application context peeled off.
    pub fn root(&self) -> &SnapshotError {
        match self {
            Self::Application { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self.root(), Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    pub fn is_orchestrator(&self) -> bool {
        matches!(self.root(), Self::Orchestrator { .. } | Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
