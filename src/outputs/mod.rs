//! Output plugin contract and built-in outputs.
//!
//! Every plugin implements [`Output`]. Plugins that can write arbitrary data
//! formats additionally implement [`SerializerOutput`] and expose it through
//! [`Output::as_serializer_output`]; only those receive a serializer during
//! configuration assembly.

pub mod blackhole;
pub mod file;
mod registry;

pub use blackhole::Blackhole;
pub use file::File;
pub use registry::{OutputCtor, OutputRegistry, default_outputs};

use std::fmt;

use crate::config::Table;
use crate::error::OutputError;
use crate::format::Serializer;
use crate::model::PageView;

/// A destination that receives batches of page views.
///
/// Lifecycle: constructed empty by the registry, configured from its table,
/// `connect`ed exactly once, written to any number of times, then `close`d.
pub trait Output: Send + fmt::Debug {
    /// Acquire the resources the output writes to.
    fn connect(&mut self) -> Result<(), OutputError>;

    /// Write one batch of page views.
    fn write(&mut self, views: &[PageView]) -> Result<(), OutputError>;

    /// Release everything acquired by `connect`.
    fn close(&mut self) -> Result<(), OutputError>;

    /// One-line human readable description.
    fn description(&self) -> &'static str;

    /// Sample configuration snippet, indented for use under `[[outputs.<name>]]`.
    fn sample_config(&self) -> &'static str;

    /// Populate the plugin's own fields from its configuration table.
    fn configure(&mut self, settings: &Table) -> Result<(), toml::de::Error>;

    /// Serializer injection capability; `None` for plugins without it.
    fn as_serializer_output(&mut self) -> Option<&mut dyn SerializerOutput> {
        None
    }
}

/// Capability of outputs that write through a pluggable serializer.
pub trait SerializerOutput {
    fn set_serializer(&mut self, serializer: Box<dyn Serializer>);
}

/// A live output together with the plugin name it was declared under.
#[derive(Debug)]
pub struct NamedOutput {
    pub name: String,
    pub output: Box<dyn Output>,
}

impl NamedOutput {
    pub fn new(name: impl Into<String>, output: Box<dyn Output>) -> Self {
        Self {
            name: name.into(),
            output,
        }
    }
}
