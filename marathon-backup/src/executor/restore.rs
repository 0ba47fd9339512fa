//! Snapshot restorer.
//!
//! Reads the `current` document of every snapshot directory, normalizes it
//! and creates it as a new application. Version files are not restored.
//! An unreadable directory, a bad snapshot or a rejected creation is
//! recorded and the run moves on.

use std::path::PathBuf;

use tracing::{info, warn};

use super::normalize::normalize_for_restore;
use crate::marathon::{Application, Orchestrator};
use crate::store::{DirFailure, SnapshotDir, SnapshotKey, SnapshotStore};
use crate::utils::errors::{Result, SnapshotError};

/// One application that could not be restored.
#[derive(Debug)]
pub struct RestoreFailure {
    /// ID from the document, or derived from the directory name when the
    /// document could not be read
    pub app_id: String,
    pub path: PathBuf,
    pub error: SnapshotError,
}

/// Outcome of a restore run
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: Vec<String>,
    pub failed: Vec<RestoreFailure>,
}

impl RestoreReport {
    pub fn succeeded(&self) -> usize {
        self.restored.len()
    }
}

/// Replays stored `current` definitions into Marathon.
pub struct SnapshotRestorer<C, S> {
    client: C,
    store: S,
}

impl<C: Orchestrator, S: SnapshotStore> SnapshotRestorer<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    /// Restore every snapshot in the store.
    ///
    /// Only a store that cannot be listed at all is an error; per-directory
    /// and per-application problems end up in the report.
    pub async fn restore(&self) -> Result<RestoreReport> {
        let dirs = self.store.list_apps()?;
        info!("Restoring applications");

        let mut report = RestoreReport::default();
        for item in dirs {
            let dir = match item {
                Ok(dir) => dir,
                Err(DirFailure { dir, error }) => {
                    let app_id = dir.app_id_hint();
                    warn!(path = %dir.path.display(), error = %error, "Skipping unreadable directory");
                    report.failed.push(RestoreFailure {
                        app_id,
                        path: dir.path,
                        error,
                    });
                    continue;
                }
            };

            let app = match self.load(&dir) {
                Ok(app) => normalize_for_restore(app),
                Err(error) => {
                    let app_id = dir.app_id_hint();
                    warn!(app_id = %app_id, error = %error, "Skipping unreadable snapshot");
                    report.failed.push(RestoreFailure {
                        app_id,
                        path: dir.current_path(),
                        error,
                    });
                    continue;
                }
            };

            let created = self.client.create_application(&app).await;
            match created {
                Ok(()) => {
                    info!(app_id = %app.id, "Restored application");
                    report.restored.push(app.id);
                }
                Err(error) => {
                    warn!(app_id = %app.id, error = %error, "Failed to create application");
                    report.failed.push(RestoreFailure {
                        app_id: app.id,
                        path: dir.current_path(),
                        error,
                    });
                }
            }
        }

        info!(
            restored = report.succeeded(),
            failed = report.failed.len(),
            "Restore complete"
        );
        Ok(report)
    }

    fn load(&self, dir: &SnapshotDir) -> Result<Application> {
        let bytes = self.store.get(dir, &SnapshotKey::Current)?;
        Application::from_document(&bytes).map_err(|source| SnapshotError::Malformed {
            path: dir.current_path(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marathon::fake::FakeOrchestrator;
    use crate::marathon::Fetch;
    use crate::store::FsSnapshotStore;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_snapshot(root: &Path, dir: &str, file: &str, body: &[u8]) {
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join(file), body).unwrap();
    }

    #[tokio::test]
    async fn test_restore_normalizes_and_ignores_versions() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_snapshot(
            root,
            "web",
            "current",
            br#"{"id":"/web","instances":5,"fetch":[{"uri":"uri://x"}],"cmd":"serve"}"#,
        );
        write_snapshot(root, "web", "v1", br#"{"id":"/web-old","instances":9}"#);

        let restorer = SnapshotRestorer::new(FakeOrchestrator::new(), FsSnapshotStore::new(root, false));
        let report = restorer.restore().await?;

        assert!(report.failed.is_empty());
        assert_eq!(report.restored, vec!["/web".to_string()]);

        let created = restorer.client.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(
            serde_json::to_value(&created[0]).unwrap(),
            json!({ "id": "/web", "instances": 0, "fetch": [], "cmd": "serve" })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_snapshot_does_not_stop_others() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_snapshot(root, "a", "current", br#"{"id":"/a","instances":1}"#);
        write_snapshot(root, "b", "current", b"{\"id\": \"/b\", ");
        write_snapshot(root, "c", "current", br#"{"id":"/c","instances":1}"#);

        let restorer = SnapshotRestorer::new(FakeOrchestrator::new(), FsSnapshotStore::new(root, false));
        let report = restorer.restore().await?;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(restorer.client.created_ids(), vec!["/a", "/c"]);

        assert_eq!(report.failed.len(), 1);
        let failure = &report.failed[0];
        assert_eq!(failure.app_id, "/b");
        assert_eq!(failure.path, root.join("b/current"));
        assert!(matches!(failure.error, SnapshotError::Malformed { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejection_is_recorded() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let store = FsSnapshotStore::new(root, false);
        for id in ["/one", "/two", "/three"] {
            let mut app = Application::new(id);
            app.fetch = Some(vec![Fetch::new("https://example.com/a.tgz")]);
            store.put(id, &SnapshotKey::Current, &app.to_document()?)?;
        }

        let client = FakeOrchestrator::new().rejecting_create_for("/two");
        let restorer = SnapshotRestorer::new(client, store);
        let report = restorer.restore().await?;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].app_id, "/two");
        assert!(report.failed[0].error.is_orchestrator());

        let created = restorer.client.created.lock().unwrap();
        assert!(created.iter().all(|a| a.fetch == Some(vec![]) && a.instances == Some(0)));
        Ok(())
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_unreadable_directory_does_not_stop_others() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_snapshot(root, "a", "current", br#"{"id":"/a"}"#);
        write_snapshot(root, "b", "current", br#"{"id":"/b"}"#);
        write_snapshot(root, "c", "current", br#"{"id":"/c"}"#);

        let locked = root.join("b");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // Permission bits are not enforced for this user (e.g. root)
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return Ok(());
        }

        let restorer = SnapshotRestorer::new(FakeOrchestrator::new(), FsSnapshotStore::new(root, false));
        let report = restorer.restore().await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let report = report?;

        assert_eq!(restorer.client.created_ids(), vec!["/a", "/c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].app_id, "/b");
        assert_eq!(report.failed[0].path, locked);
        assert!(matches!(report.failed[0].error, SnapshotError::Io { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsSnapshotStore::new(temp_dir.path().join("missing"), false);
        let restorer = SnapshotRestorer::new(FakeOrchestrator::new(), store);

        let err = restorer.restore().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_backup_then_restore() -> Result<()> {
        use crate::executor::backup::SnapshotWriter;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let mut web = Application::new("/web");
        web.instances = Some(5);
        web.fetch = Some(vec![Fetch::new("uri://x")]);

        let source = FakeOrchestrator::new().with_app(web, &["v1"]);
        SnapshotWriter::new(source, FsSnapshotStore::new(root, false))
            .backup()
            .await?;
        assert!(root.join("web/current").is_file());
        assert!(root.join("web/v1").is_file());

        let restorer = SnapshotRestorer::new(FakeOrchestrator::new(), FsSnapshotStore::new(root, false));
        let report = restorer.restore().await?;
        assert_eq!(report.restored, vec!["/web".to_string()]);

        let created = restorer.client.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, "/web");
        assert_eq!(created[0].instances, Some(0));
        assert_eq!(created[0].fetch, Some(vec![]));
        Ok(())
    }
}
