//! Marathon Backup Tool library
//!
//! Snapshots every Marathon application (current definition plus version
//! history) into a directory tree and replays the current definitions into
//! a Marathon instance.

pub mod config;
pub mod executor;
pub mod marathon;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use executor::{SnapshotRestorer, SnapshotWriter};
pub use marathon::{Application, MarathonClient, Orchestrator};
pub use store::{FsSnapshotStore, SnapshotStore};
pub use utils::errors::SnapshotError;
pub type Result<T> = std::result::Result<T, SnapshotError>;
