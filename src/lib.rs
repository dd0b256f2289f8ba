//! # za-outputs
//!
//! Configuration-driven output assembly for a page-view analytics pipeline.
//!
//! ## Overview
//!
//! za-outputs provides:
//! - **Config assembly**: Turn a TOML document into global settings, trackers
//!   and live output plugins
//! - **Plugin registry**: Resolve `[[outputs.<name>]]` sections to output constructors
//! - **Serializer wiring**: Outputs that accept a serializer get one built from
//!   `data_format` / `data_format_template`
//! - **File output**: Fan page views out to stdout and any number of files
//! - **Runtime engine**: Connect, write and close outputs with configurable error policies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use za_outputs::{Config, ErrorPolicy, OutputEngine, PageView, default_outputs};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = default_outputs();
//!     let config = Config::load_file("za.toml", &registry)?;
//!
//!     let mut engine = OutputEngine::from_config(config, ErrorPolicy::Accumulate);
//!     engine.connect_all()?;
//!     engine.write_all(&[PageView::new("UA-1234-1").with_path("/")])?;
//!     engine.close_all()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [global]
//! geo_ip_database = "/var/opt/geo/dbip-country-lite.mmdb"
//! tags = { dc = "eu-west" }
//!
//! [[trackers]]
//! tracking_id = "UA-1234-1"
//! badge = "MyApp|tracking|#ff0000"
//!
//! [[outputs.file]]
//! files = ["stdout", "/tmp/access.log"]
//! data_format = "json"
//! ```
//!
//! ## Features
//!
//! - `yaml` - YAML data format
//! - `xml` - XML data format
//! - `miette` - Pretty error reporting with miette
//! - `cli` - The `za_outputs` binary

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod model;
pub mod outputs;

pub use config::{Config, ConfigLoader, GlobalConfig, Tracker, validate_badge};
pub use engine::OutputEngine;
pub use error::{AggregateError, ConfigError, ErrorPolicy, OutputError, OutputFailure, Stage};
pub use format::{CustomFormat, FormatError, FormatKind, FormatRegistry, Serializer, default_registry};
pub use io::{FanOutWriter, FileOutput, InMemorySink, OutputTarget, StdoutOutput};
pub use model::PageView;
pub use outputs::{NamedOutput, Output, OutputRegistry, SerializerOutput, default_outputs};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::ConfigDiagnostic;
