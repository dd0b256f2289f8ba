//! Page-view record handed to outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single tracked page view.
///
/// Outputs treat this as an opaque record: they serialize it and write the
/// bytes, nothing more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub tracking_id: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub browser: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub referer: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub document_title: String,
    #[serde(default)]
    pub user_agent: String,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl PageView {
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}
