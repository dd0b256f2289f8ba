//! File output: writes serialized page views to stdout and/or files.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use super::{Output, SerializerOutput};
use crate::config::Table;
use crate::error::OutputError;
use crate::format::{JsonSerializer, Serializer};
use crate::io::{FanOutWriter, FileOutput, OutputTarget, STDOUT, StdoutOutput};
use crate::model::PageView;

const SAMPLE_CONFIG: &str = r#"
  ## Files to write to, "stdout" is a specially handled file.
  files = ["stdout", "/tmp/access.log"]
  ## Data format to output.
  data_format = "json"
"#;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    #[serde(default)]
    files: Vec<String>,
}

/// Output fanning every page view out to a list of destinations.
///
/// `"stdout"` denotes the process's standard output; every other entry is a
/// path created (or truncated) on `connect`. `connect` must be called exactly
/// once: calling it again rebuilds the destination set and truncates the
/// files anew.
#[derive(Debug)]
pub struct File {
    files: Vec<String>,
    writer: Option<FanOutWriter>,
    serializer: Box<dyn Serializer>,
}

impl Default for File {
    fn default() -> Self {
        Self::new()
    }
}

impl File {
    pub const NAME: &'static str = "file";

    /// An unconfigured file output, serializing as JSON until told otherwise.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            writer: None,
            serializer: Box::new(JsonSerializer),
        }
    }

    /// A file output writing to `files`.
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn serializer(&self) -> &dyn Serializer {
        self.serializer.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    /// Number of destinations that `close` will release (stdout excluded).
    pub fn open_handles(&self) -> usize {
        self.writer.as_ref().map_or(0, FanOutWriter::closable_count)
    }

    fn resolve_target(destination: &str) -> Arc<dyn OutputTarget> {
        if destination == STDOUT {
            Arc::new(StdoutOutput::new())
        } else {
            Arc::new(FileOutput::new(PathBuf::from(destination)))
        }
    }

    /// Open every target and install the combined writer.
    ///
    /// The first target that fails to open aborts the connection.
    pub(crate) fn connect_targets(
        &mut self,
        targets: &[Arc<dyn OutputTarget>],
    ) -> Result<(), OutputError> {
        if self.writer.is_some() {
            log::debug!("outputs.file connected again, previous destinations are replaced");
        }

        let mut writer = FanOutWriter::new();
        for target in targets {
            let handle = target.open().map_err(|source| OutputError::Open {
                target: target.id().to_string(),
                source,
            })?;
            writer.push(target.id(), handle, target.is_closable());
        }

        self.writer = Some(writer);
        Ok(())
    }
}

impl SerializerOutput for File {
    fn set_serializer(&mut self, serializer: Box<dyn Serializer>) {
        self.serializer = serializer;
    }
}

impl Output for File {
    fn connect(&mut self) -> Result<(), OutputError> {
        if self.files.is_empty() {
            self.files = vec![STDOUT.to_string()];
        }

        let targets: Vec<Arc<dyn OutputTarget>> = self
            .files
            .iter()
            .map(|destination| Self::resolve_target(destination))
            .collect();
        self.connect_targets(&targets)
    }

    fn write(&mut self, views: &[PageView]) -> Result<(), OutputError> {
        let writer = self.writer.as_mut().ok_or(OutputError::NotConnected)?;
        let mut write_err = None;

        for view in views {
            let bytes = match self.serializer.serialize(view) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::debug!("could not serialize page view: {e}");
                    continue;
                }
            };

            if let Err(e) = writer.write_all(&bytes) {
                write_err = Some(OutputError::Write(e));
            }
        }

        write_err.map_or(Ok(()), Err)
    }

    fn close(&mut self) -> Result<(), OutputError> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        writer
            .close()
            .into_iter()
            .map(|(target, source)| OutputError::Close { target, source })
            .last()
            .map_or(Ok(()), Err)
    }

    fn description(&self) -> &'static str {
        "Send page view to file(s)"
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    fn configure(&mut self, settings: &Table) -> Result<(), toml::de::Error> {
        let settings: FileSettings = settings.unmarshal()?;
        self.files = settings.files;
        Ok(())
    }

    fn as_serializer_output(&mut self) -> Option<&mut dyn SerializerOutput> {
        Some(self)
    }
}
