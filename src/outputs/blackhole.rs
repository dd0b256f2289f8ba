//! Blackhole output: accepts page views and discards them.

use serde::Deserialize;

use super::Output;
use crate::config::Table;
use crate::error::OutputError;
use crate::model::PageView;

const SAMPLE_CONFIG: &str = r#"
  ## No settings, page views are counted and dropped.
"#;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlackholeSettings {}

/// Discards everything written to it. Useful for dry runs and benchmarks.
///
/// It does not take a serializer, so `data_format` is rejected in its table.
#[derive(Debug, Default)]
pub struct Blackhole {
    written: u64,
    connected: bool,
}

impl Blackhole {
    pub const NAME: &'static str = "blackhole";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of page views received since construction.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Output for Blackhole {
    fn connect(&mut self) -> Result<(), OutputError> {
        self.connected = true;
        Ok(())
    }

    fn write(&mut self, views: &[PageView]) -> Result<(), OutputError> {
        self.written += views.len() as u64;
        Ok(())
    }

    fn close(&mut self) -> Result<(), OutputError> {
        log::debug!("outputs.blackhole discarded {} page view(s)", self.written);
        self.connected = false;
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Discard page views"
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    fn configure(&mut self, settings: &Table) -> Result<(), toml::de::Error> {
        let BlackholeSettings {} = settings.unmarshal()?;
        Ok(())
    }
}
