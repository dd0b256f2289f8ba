//! Runtime driver for assembled outputs.

use crate::config::Config;
use crate::error::{AggregateError, ErrorPolicy, OutputError, OutputFailure, Stage};
use crate::model::PageView;
use crate::outputs::NamedOutput;

/// Owns the live outputs of a configuration and drives their lifecycle.
///
/// Outputs are connected once, receive every batch in declaration order, and
/// are closed either by `close_all` or, failing that, when the engine is
/// dropped.
#[derive(Debug)]
pub struct OutputEngine {
    error_policy: ErrorPolicy,
    outputs: Vec<NamedOutput>,
    /// Number of leading outputs whose `connect` succeeded and that are not closed yet
    connected: usize,
}

impl OutputEngine {
    pub fn new(outputs: Vec<NamedOutput>, error_policy: ErrorPolicy) -> Self {
        Self {
            error_policy,
            outputs,
            connected: 0,
        }
    }

    /// Take the outputs of an assembled configuration.
    pub fn from_config(config: Config, error_policy: ErrorPolicy) -> Self {
        Self::new(config.into_outputs(), error_policy)
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn outputs(&self) -> &[NamedOutput] {
        &self.outputs
    }

    pub fn is_connected(&self) -> bool {
        self.connected > 0
    }

    fn failure(stage: Stage, output: &NamedOutput, error: OutputError) -> OutputFailure {
        OutputFailure {
            stage,
            output: output.name.clone(),
            error,
        }
    }

    /// Connect every output in declaration order.
    ///
    /// Stops at the first failure regardless of the error policy. Outputs
    /// connected before it stay connected and are released by `close_all`.
    pub fn connect_all(&mut self) -> Result<(), AggregateError> {
        for named in self.outputs.iter_mut().skip(self.connected) {
            if let Err(e) = named.output.connect() {
                return Err(Self::failure(Stage::Connect, named, e).into());
            }
            log::debug!("outputs.{} connected", named.name);
            self.connected += 1;
        }
        Ok(())
    }

    /// Write one batch to every connected output.
    ///
    /// With `FastFail` the first failing output stops the batch; with
    /// `Accumulate` every output receives it and all failures are returned.
    pub fn write_all(&mut self, views: &[PageView]) -> Result<(), AggregateError> {
        let mut errors = Vec::new();

        for named in self.outputs.iter_mut().take(self.connected) {
            if let Err(e) = named.output.write(views) {
                errors.push(Self::failure(Stage::Write, named, e));
                if matches!(self.error_policy, ErrorPolicy::FastFail) {
                    return Err(AggregateError { errors });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { errors })
        }
    }

    /// Close every connected output. All outputs are attempted.
    pub fn close_all(&mut self) -> Result<(), AggregateError> {
        let mut errors = Vec::new();

        for named in self.outputs.iter_mut().take(self.connected) {
            if let Err(e) = named.output.close() {
                errors.push(Self::failure(Stage::Close, named, e));
            }
        }
        self.connected = 0;

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { errors })
        }
    }
}

impl Drop for OutputEngine {
    fn drop(&mut self) {
        if self.connected == 0 {
            return;
        }
        if let Err(agg) = self.close_all() {
            for e in &agg.errors {
                log::error!("{e}");
            }
        }
    }
}
