//! Marathon application definitions.
//!
//! Only the fields the snapshot engine reads are typed. Everything else is
//! kept in a flattened map so a snapshot round-trips documents without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Marathon application definition as returned by `/v2/apps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Path-like unique ID, e.g. `/group/service`
    pub id: String,

    /// Desired number of running instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,

    /// Artifacts fetched into the sandbox before the task starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<Vec<Fetch>>,

    /// All remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of an application's `fetch` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fetch {
    pub uri: String,

    /// executable, extract, cache, outputFile, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Application {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instances: None,
            fetch: None,
            extra: Map::new(),
        }
    }

    /// Encode in Marathon's JSON wire form.
    pub fn to_document(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_document(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

impl Fetch {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            extra: Map::new(),
        }
    }
}
