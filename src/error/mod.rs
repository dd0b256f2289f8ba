//! Error types and policies for configuration assembly and output runtime.
//!
//! This module provides:
//! - `ConfigError`: Everything that can abort loading a configuration
//! - `OutputError`: Failures raised by a single output plugin
//! - `ErrorPolicy`: Controls whether the engine fails fast or accumulates errors
//! - `Stage`: Indicates which lifecycle step of an output failed
//! - `OutputFailure` / `AggregateError`: Engine-level error reporting

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatError;

/// Errors that abort configuration assembly.
///
/// Any of these means the configuration is not usable; no partial `Config`
/// is ever returned alongside them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("unable to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML
    #[error("unable to parse configuration: {0}")]
    Parse(#[source] toml::de::Error),

    /// A top-level section has the wrong shape
    #[error("invalid configuration, error parsing {0} table")]
    InvalidSection(&'static str),

    /// The `global` table could not be mapped onto `GlobalConfig`
    #[error("error parsing global table: {}", .0.message())]
    Global(#[source] toml::de::Error),

    /// A `[[trackers]]` element was rejected
    #[error("error parsing trackers array, {0}")]
    Tracker(#[source] Box<ConfigError>),

    /// A tracker badge does not follow `<title>|<label>|<color>`
    #[error("invalid badge format: expecting \"<title>|<label>|<color>\" got: {0}")]
    InvalidBadge(String),

    /// An `outputs.<name>` entry is not an array of tables
    #[error("unsupported output config format: {0}")]
    UnsupportedOutputFormat(String),

    /// No plugin is registered under the requested name
    #[error("undefined but requested output: {0}")]
    UndefinedOutput(String),

    /// An `[[outputs.<name>]]` element was rejected
    #[error("error parsing {name} array, {source}")]
    Output {
        name: String,
        #[source]
        source: Box<ConfigError>,
    },

    /// The serializer requested by an output could not be built
    #[error(transparent)]
    Serializer(#[from] FormatError),

    /// A table could not be mapped onto a typed settings struct
    #[error("{}", .0.message())]
    Settings(#[source] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn output(name: &str, source: ConfigError) -> Self {
        ConfigError::Output {
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}

/// Errors raised by an output plugin at runtime.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A destination could not be opened during `connect`
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a serialized page view failed
    #[error("failed to write message: {0}")]
    Write(#[source] std::io::Error),

    /// Releasing a destination failed during `close`
    #[error("failed to close {target}: {source}")]
    Close {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// `write` was called before `connect`
    #[error("output is not connected")]
    NotConnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing output
    FastFail,
    /// Visit every output and return all failures together
    #[default]
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Write,
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Connect => write!(f, "Connect"),
            Stage::Write => write!(f, "Write"),
            Stage::Close => write!(f, "Close"),
        }
    }
}

/// A failure of one output during one lifecycle stage.
#[derive(Debug)]
pub struct OutputFailure {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Plugin name the output was declared under (e.g. "file")
    pub output: String,
    /// The underlying error
    pub error: OutputError,
}

impl fmt::Display for OutputFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] outputs.{}: {}", self.stage, self.output, self.error)
    }
}

impl std::error::Error for OutputFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// A collection of output failures gathered by the engine.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual failures, in output declaration order
    pub errors: Vec<OutputFailure>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "outputs encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    pub fn single(error: OutputFailure) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<OutputFailure> for AggregateError {
    fn from(error: OutputFailure) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
