//! Utility modules shared by the snapshot writer and restorer.

pub mod errors;
pub mod logger;

pub use errors::{Result, SnapshotError};
