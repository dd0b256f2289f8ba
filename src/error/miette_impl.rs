//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, ConfigError, OutputFailure};

/// A diagnostic wrapper for configuration and output errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct ConfigDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn config_help(e: &ConfigError) -> &'static str {
    match e {
        ConfigError::Read { .. } => "Check that the configuration path exists and is readable",
        ConfigError::Parse(_) => "The configuration must be a valid TOML document",
        ConfigError::InvalidBadge(_) => "Badges look like `title|label|#color`",
        ConfigError::UndefinedOutput(_) => "Run with --sample to list the available outputs",
        ConfigError::UnsupportedOutputFormat(_) => {
            "Declare outputs as arrays of tables, e.g. [[outputs.file]]"
        }
        ConfigError::Tracker(inner) | ConfigError::Output { source: inner, .. } => {
            config_help(inner)
        }
        _ => "Check the configuration against the sample configuration",
    }
}

impl From<ConfigError> for ConfigDiagnostic {
    fn from(e: ConfigError) -> Self {
        ConfigDiagnostic {
            message: "invalid configuration".into(),
            help: Some(config_help(&e).into()),
            source: Some(Box::new(e)),
            severity: Severity::Error,
        }
    }
}

impl From<OutputFailure> for ConfigDiagnostic {
    fn from(e: OutputFailure) -> Self {
        ConfigDiagnostic {
            message: format!("[{}] on 'outputs.{}'", e.stage, e.output),
            source: Some(Box::new(e.error)),
            help: Some("Check the output destinations and their permissions".into()),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for ConfigDiagnostic {
    fn from(agg: AggregateError) -> Self {
        match agg.errors.into_iter().next() {
            Some(e) => ConfigDiagnostic::from(e),
            None => ConfigDiagnostic {
                message: "Unknown output error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(ConfigDiagnostic::from(agg))
    }
}
