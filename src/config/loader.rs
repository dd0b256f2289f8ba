//! Assembly of a `Config` from a document tree.

use std::path::Path;

use super::document::{Node, Table};
use super::env::expand_env;
use super::serializer::build_serializer;
use super::tracker::{DEFAULT_BADGE, Tracker, validate_badge};
use super::{Config, GlobalConfig};
use crate::error::ConfigError;
use crate::format::FormatRegistry;
use crate::outputs::{NamedOutput, Output, OutputRegistry};

const GLOBAL: &str = "global";
const TRACKERS: &str = "trackers";
const OUTPUTS: &str = "outputs";

/// Builds a `Config` from configuration text or a parsed document.
///
/// Sections are processed in a fixed order (`global`, `trackers`, `outputs`)
/// and the first error aborts the load.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader<'a> {
    outputs: &'a OutputRegistry,
    formats: &'a FormatRegistry,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(outputs: &'a OutputRegistry, formats: &'a FormatRegistry) -> Self {
        Self { outputs, formats }
    }

    /// Read `path`, expand environment references and assemble it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading configuration from {}", path.display());
        self.load_str(&expand_env(&text))
    }

    /// Parse and assemble configuration text. No environment expansion is done.
    pub fn load_str(&self, text: &str) -> Result<Config, ConfigError> {
        self.load_table(&Table::parse(text)?)
    }

    /// Assemble an already parsed document.
    pub fn load_table(&self, root: &Table) -> Result<Config, ConfigError> {
        let mut config = Config::new();
        config.global = parse_global(root)?;
        config.trackers = parse_trackers(root)?;
        config.outputs = self.parse_outputs(root)?;
        Ok(config)
    }

    fn parse_outputs(&self, root: &Table) -> Result<Vec<NamedOutput>, ConfigError> {
        let Some(node) = root.get(OUTPUTS) else {
            return Ok(Vec::new());
        };
        let Node::Table(plugins) = node else {
            return Err(ConfigError::InvalidSection(OUTPUTS));
        };

        let mut outputs = Vec::new();
        for (name, plugin) in plugins.iter() {
            // An inline `[]` classifies as tables too but declares no instance.
            let instances = match plugin {
                Node::Tables(instances) if !instances.is_empty() => instances,
                _ => return Err(ConfigError::UnsupportedOutputFormat(name.to_string())),
            };
            for table in instances {
                let output = self
                    .build_output(name, table)
                    .map_err(|e| ConfigError::output(name, e))?;
                log::debug!("output `{name}` registered: {}", output.description());
                outputs.push(NamedOutput::new(name, output));
            }
        }
        Ok(outputs)
    }

    fn build_output(&self, name: &str, table: &Table) -> Result<Box<dyn Output>, ConfigError> {
        let ctor = self
            .outputs
            .lookup(name)
            .ok_or_else(|| ConfigError::UndefinedOutput(name.to_string()))?;
        let mut output = ctor();

        // Serializer fields are consumed here so they never reach `configure`.
        let settings = match output.as_serializer_output() {
            Some(target) => {
                let (serializer, remaining) = build_serializer(self.formats, table)?;
                target.set_serializer(serializer);
                remaining
            }
            None => table.clone(),
        };

        output.configure(&settings).map_err(ConfigError::Settings)?;
        Ok(output)
    }
}

fn parse_global(root: &Table) -> Result<GlobalConfig, ConfigError> {
    match root.get(GLOBAL) {
        None => Ok(GlobalConfig::default()),
        Some(Node::Table(table)) => table.unmarshal().map_err(ConfigError::Global),
        Some(_) => Err(ConfigError::InvalidSection(GLOBAL)),
    }
}

fn parse_trackers(root: &Table) -> Result<Vec<Tracker>, ConfigError> {
    let Some(node) = root.get(TRACKERS) else {
        return Ok(Vec::new());
    };
    let Node::Tables(tables) = node else {
        return Err(ConfigError::InvalidSection(TRACKERS));
    };

    tables
        .iter()
        .map(|table| parse_tracker(table).map_err(|e| ConfigError::Tracker(Box::new(e))))
        .collect()
}

fn parse_tracker(table: &Table) -> Result<Tracker, ConfigError> {
    let mut tracker: Tracker = table.unmarshal().map_err(ConfigError::Settings)?;

    if tracker.badge.is_empty() {
        tracker.badge = DEFAULT_BADGE.to_string();
    } else if !validate_badge(&tracker.badge) {
        return Err(ConfigError::InvalidBadge(tracker.badge));
    }

    log::debug!("tracker `{}` registered", tracker.tracking_id);
    Ok(tracker)
}
