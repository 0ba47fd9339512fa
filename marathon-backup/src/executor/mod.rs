//! Backup and restore runs.
//!
//! Both runs are a single sequential pass with no persisted intermediate
//! state. Backup is fail-fast; restore is fail-soft per application.

pub mod backup;
pub mod normalize;
pub mod restore;

pub use backup::{BackupSummary, SnapshotWriter};
pub use normalize::normalize_for_restore;
pub use restore::{RestoreFailure, RestoreReport, SnapshotRestorer};
