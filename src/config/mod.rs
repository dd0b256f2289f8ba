//! Configuration model and assembly.
//!
//! This module provides:
//! - `Table` / `Node`: Generic document tree of a parsed TOML document
//! - `Config`: Global settings, trackers and live outputs
//! - `ConfigLoader`: Assembles a `Config` from a document tree
//! - `validate_badge`: Badge syntax check used while loading trackers

mod document;
mod env;
mod loader;
mod serializer;
mod tracker;

pub use document::{Node, Table};
pub use env::expand_env;
pub use loader::ConfigLoader;
pub use serializer::{DATA_FORMAT_KEY, DATA_FORMAT_TEMPLATE_KEY, build_serializer, serializer_config};
pub use tracker::{DEFAULT_BADGE, Tracker, validate_badge};

#[cfg(test)]
pub(crate) use env::expand_with;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::format::default_registry;
use crate::outputs::{NamedOutput, OutputRegistry};

/// The `[global]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub geo_ip_database: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Root of an assembled configuration.
///
/// Outputs are configured but not connected; connecting them is up to the
/// caller (see `OutputEngine`).
#[derive(Debug, Default)]
pub struct Config {
    pub global: GlobalConfig,
    pub trackers: Vec<Tracker>,
    pub outputs: Vec<NamedOutput>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file using the default formats.
    pub fn load_file(path: impl AsRef<Path>, outputs: &OutputRegistry) -> Result<Self, ConfigError> {
        let formats = default_registry();
        ConfigLoader::new(outputs, &formats).load_file(path)
    }

    /// Load a configuration document using the default formats.
    pub fn from_str_with(text: &str, outputs: &OutputRegistry) -> Result<Self, ConfigError> {
        let formats = default_registry();
        ConfigLoader::new(outputs, &formats).load_str(text)
    }

    /// The first tracker declared with `tracking_id`.
    pub fn tracker(&self, tracking_id: &str) -> Option<&Tracker> {
        self.trackers.iter().find(|t| t.tracking_id == tracking_id)
    }

    /// Hand the live outputs over to a runtime.
    pub fn into_outputs(self) -> Vec<NamedOutput> {
        self.outputs
    }
}
