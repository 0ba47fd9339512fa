//! Marathon collaborator: the application model and the remote API.

pub mod application;
pub mod client;

#[cfg(test)]
pub(crate) mod fake;

pub use application::{Application, Fetch};
pub use client::MarathonClient;

use std::future::Future;

use crate::Result;

/// Remote operations the snapshot engine needs from the orchestrator.
pub trait Orchestrator {
    /// Every application visible to the caller's credentials.
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>>> + Send;

    /// Version identifiers of one application, in the order Marathon returns them.
    fn list_versions(&self, app_id: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    fn get_application_version(
        &self,
        app_id: &str,
        version: &str,
    ) -> impl Future<Output = Result<Application>> + Send;

    fn create_application(&self, app: &Application) -> impl Future<Output = Result<()>> + Send;
}
