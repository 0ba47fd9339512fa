//! Snapshot writer.
//!
//! One sequential pass: list every application, then for each write its
//! current definition followed by every historical version. The first
//! failure of any kind stops the run; files already written stay on disk.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{error, info};

use crate::marathon::{Application, Orchestrator};
use crate::store::{SnapshotKey, SnapshotStore};
use crate::utils::errors::Result;

/// Outcome of a completed backup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSummary {
    pub applications: usize,
    pub versions: usize,
    pub files_written: usize,
    pub duration_secs: u64,
}

/// Writes snapshots of every Marathon application into a store.
pub struct SnapshotWriter<C, S> {
    client: C,
    store: S,
}

impl<C: Orchestrator, S: SnapshotStore> SnapshotWriter<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    /// Run a full backup.
    pub async fn backup(&self) -> Result<BackupSummary> {
        let start_time = Instant::now();

        let apps = self.client.list_applications().await?;
        info!("Backing up {} applications", apps.len());

        self.store.prepare()?;

        let mut summary = BackupSummary::default();
        for app in &apps {
            let written = match self.save(app).await {
                Ok(written) => written,
                Err(e) => {
                    error!(app_id = %app.id, error = %e, "Backup aborted");
                    return Err(e.for_application(&app.id));
                }
            };

            summary.applications += 1;
            summary.versions += written.len() - 1;
            summary.files_written += written.len();
        }

        summary.duration_secs = start_time.elapsed().as_secs();
        info!(
            applications = summary.applications,
            versions = summary.versions,
            "Backup complete"
        );
        Ok(summary)
    }

    /// Write one application's `current` file and its version history.
    async fn save(&self, app: &Application) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        let document = app.to_document()?;
        written.push(self.store.put(&app.id, &SnapshotKey::Current, &document)?);

        let versions = self.client.list_versions(&app.id).await?;
        for version in versions {
            let previous = self.client.get_application_version(&app.id, &version).await?;
            let document = previous.to_document()?;
            written.push(self.store.put(&app.id, &SnapshotKey::Version(version), &document)?);
        }

        Ok(written)
    }
}
