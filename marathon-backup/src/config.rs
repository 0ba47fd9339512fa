//! Configuration management for mbt.
//!
//! Loads configuration from an optional TOML file; command-line flags are
//! layered on top with [`Config::with_overrides`]. The finished value is
//! immutable and handed to the client and store constructors.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::errors::{Result, SnapshotError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub marathon: MarathonConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarathonConfig {
    /// Marathon endpoint, e.g. http://localhost:8080
    #[serde(default = "default_url")]
    pub url: String,

    /// HTTP basic auth user
    #[serde(default)]
    pub user: Option<String>,

    /// HTTP basic auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds (None = client default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Root directory holding one snapshot directory per application
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Replace snapshot files that already exist
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Values supplied on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    /// `user:password`
    pub credentials: Option<String>,
    pub root: Option<PathBuf>,
    pub force: bool,
    pub log_level: Option<String>,
}

// Default values
fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("marathon-backup")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MarathonConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: None,
            password: None,
            timeout_secs: None,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            force: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
        toml::from_str(&content).map_err(|e| {
            SnapshotError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply command-line values on top of this configuration.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(endpoint) = overrides.endpoint {
            self.marathon.url = endpoint;
        }

        if let Some(credentials) = overrides.credentials {
            let (user, password) = parse_credentials(&credentials)?;
            self.marathon.user = Some(user);
            self.marathon.password = Some(password);
        }

        if let Some(root) = overrides.root {
            self.snapshot.root = root;
        }

        // --force can only switch overwriting on
        self.snapshot.force |= overrides.force;

        if let Some(level) = overrides.log_level {
            self.log.level = level;
        }

        Ok(self)
    }
}

impl MarathonConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Basic auth pair, if a user is configured
    pub fn basic_auth(&self) -> Option<(&str, Option<&str>)> {
        self.user
            .as_deref()
            .map(|user| (user, self.password.as_deref()))
    }
}

/// Split a `user:password` pair. The password may itself contain `:`.
fn parse_credentials(value: &str) -> Result<(String, String)> {
    match value.split_once(':') {
        Some((user, password)) if !user.is_empty() => {
            Ok((user.to_string(), password.to_string()))
        }
        _ => Err(SnapshotError::Config(
            "expected credentials in the form user:password".to_string(),
        )),
    }
}
