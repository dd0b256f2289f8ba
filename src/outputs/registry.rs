//! Registry mapping plugin names to output constructors.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::{Blackhole, File, Output};

/// Zero-argument constructor returning a fresh, unconfigured output.
pub type OutputCtor = fn() -> Box<dyn Output>;

/// Name to constructor mapping consulted while assembling `[outputs]`.
///
/// Built once at start-up and passed by reference to the config loader.
#[derive(Debug, Clone, Default)]
pub struct OutputRegistry {
    ctors: HashMap<String, OutputCtor>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// Register `ctor` under `name`.
    ///
    /// Registering a name twice keeps the last constructor; the replaced one is
    /// returned.
    pub fn register(&mut self, name: impl Into<String>, ctor: OutputCtor) -> Option<OutputCtor> {
        let name = name.into();
        let previous = self.ctors.insert(name.clone(), ctor);
        if previous.is_some() {
            log::warn!("output plugin `{name}` registered twice, keeping the last registration");
        }
        previous
    }

    /// Register `ctor` under `name` (builder pattern).
    pub fn with_output(mut self, name: impl Into<String>, ctor: OutputCtor) -> Self {
        self.register(name, ctor);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<OutputCtor> {
        self.ctors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ctors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sample configuration covering every registered plugin.
    pub fn sample_config(&self) -> String {
        let mut out = String::new();
        for name in self.names() {
            let Some(ctor) = self.lookup(name) else {
                continue;
            };
            let output = ctor();
            let _ = writeln!(out, "# {}", output.description());
            let _ = writeln!(out, "[[outputs.{name}]]{}", output.sample_config());
        }
        out
    }
}

fn new_file() -> Box<dyn Output> {
    Box::new(File::new())
}

fn new_blackhole() -> Box<dyn Output> {
    Box::new(Blackhole::new())
}

/// Create a registry holding every built-in output.
pub fn default_outputs() -> OutputRegistry {
    let mut registry = OutputRegistry::new();
    registry.register(File::NAME, new_file);
    registry.register(Blackhole::NAME, new_blackhole);
    registry
}
