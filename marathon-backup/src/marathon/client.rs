//! HTTP client for the Marathon v2 REST API.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{Application, Orchestrator};
use crate::config::MarathonConfig;
use crate::utils::errors::{Result, SnapshotError};

#[derive(Debug, Deserialize)]
struct AppsResponse {
    apps: Vec<Application>,
}

#[derive(Debug, Deserialize)]
struct VersionsResponse {
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Marathon client with optional basic auth and request timeout.
#[derive(Debug, Clone)]
pub struct MarathonClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<(String, Option<String>)>,
}

impl MarathonClient {
    pub fn new(config: &MarathonConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.url.trim_end_matches('/').to_string(),
            auth: config
                .basic_auth()
                .map(|(user, password)| (user.to_string(), password.map(str::to_string))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/v2/apps/<id><suffix>`; Marathon IDs already start with `/`.
    fn app_url(&self, app_id: &str, suffix: &str) -> String {
        format!(
            "{}/v2/apps/{}{}",
            self.base_url,
            app_id.trim_start_matches('/'),
            suffix
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http.request(method, url);
        match &self.auth {
            Some((user, password)) => request.basic_auth(user, password.as_ref()),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = check_status(self.request(Method::GET, url).send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-2xx response into an orchestrator error carrying Marathon's message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.trim().to_string()
            }
        });

    Err(SnapshotError::Orchestrator {
        status: Some(status.as_u16()),
        message,
    })
}

impl Orchestrator for MarathonClient {
    async fn list_applications(&self) -> Result<Vec<Application>> {
        let url = format!("{}/v2/apps", self.base_url);
        let response: AppsResponse = self.get_json(&url).await?;
        Ok(response.apps)
    }

    async fn list_versions(&self, app_id: &str) -> Result<Vec<String>> {
        let response: VersionsResponse = self.get_json(&self.app_url(app_id, "/versions")).await?;
        Ok(response.versions)
    }

    async fn get_application_version(&self, app_id: &str, version: &str) -> Result<Application> {
        let url = self.app_url(app_id, &format!("/versions/{}", version));
        self.get_json(&url).await
    }

    async fn create_application(&self, app: &Application) -> Result<()> {
        let url = format!("{}/v2/apps", self.base_url);
        debug!("POST {} ({})", url, app.id);
        let response = self.request(Method::POST, &url).json(app).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
