//! In-memory orchestrator used by the engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{Application, Orchestrator};
use crate::utils::errors::{Result, SnapshotError};

#[derive(Default)]
pub(crate) struct FakeOrchestrator {
    apps: Vec<Application>,
    versions: HashMap<String, Vec<(String, Application)>>,
    fail_versions_for: HashSet<String>,
    reject_create_for: HashSet<String>,
    pub(crate) version_calls: Mutex<Vec<String>>,
    pub(crate) created: Mutex<Vec<Application>>,
}

impl FakeOrchestrator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register an application whose history is `versions` (returned in this order).
    pub(crate) fn with_app(mut self, app: Application, versions: &[&str]) -> Self {
        let history = versions
            .iter()
            .map(|v| {
                let mut old = app.clone();
                old.extra.insert("version".into(), (*v).into());
                (v.to_string(), old)
            })
            .collect();
        self.versions.insert(app.id.clone(), history);
        self.apps.push(app);
        self
    }

    pub(crate) fn failing_versions_for(mut self, app_id: &str) -> Self {
        self.fail_versions_for.insert(app_id.to_string());
        self
    }

    pub(crate) fn rejecting_create_for(mut self, app_id: &str) -> Self {
        self.reject_create_for.insert(app_id.to_string());
        self
    }

    pub(crate) fn created_ids(&self) -> Vec<String> {
        self.created.lock().unwrap().iter().map(|a| a.id.clone()).collect()
    }
}

impl Orchestrator for FakeOrchestrator {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        Ok(self.apps.clone())
    }

    async fn list_versions(&self, app_id: &str) -> Result<Vec<String>> {
        self.version_calls.lock().unwrap().push(app_id.to_string());
        if self.fail_versions_for.contains(app_id) {
            return Err(SnapshotError::Orchestrator {
                status: Some(503),
                message: "Marathon is leading an election".into(),
            });
        }
        Ok(self
            .versions
            .get(app_id)
            .map(|h| h.iter().map(|(v, _)| v.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_application_version(&self, app_id: &str, version: &str) -> Result<Application> {
        self.versions
            .get(app_id)
            .and_then(|h| h.iter().find(|(v, _)| v == version))
            .map(|(_, app)| app.clone())
            .ok_or_else(|| SnapshotError::Orchestrator {
                status: Some(404),
                message: format!("App '{}' does not exist in version {}", app_id, version),
            })
    }

    async fn create_application(&self, app: &Application) -> Result<()> {
        if self.reject_create_for.contains(&app.id) {
            return Err(SnapshotError::Orchestrator {
                status: Some(409),
                message: format!("An app with id [{}] already exists.", app.id),
            });
        }
        self.created.lock().unwrap().push(app.clone());
        Ok(())
    }
}
