//! Miette diagnostics built from configuration and output errors.

use miette::Diagnostic;

use crate::error::{AggregateError, ConfigDiagnostic, ConfigError, OutputError, OutputFailure, Stage};

#[test]
fn nested_config_errors_keep_the_specific_help() {
    let err = ConfigError::output("nonexistent", ConfigError::UndefinedOutput("nonexistent".into()));
    let diag = ConfigDiagnostic::from(err);

    assert_eq!(diag.to_string(), "invalid configuration");
    let help = diag.help().unwrap().to_string();
    assert!(help.contains("--sample"), "{help}");
}

#[test]
fn aggregate_reports_its_first_failure() {
    let agg = AggregateError::single(OutputFailure {
        stage: Stage::Write,
        output: "file".into(),
        error: OutputError::NotConnected,
    });
    let diag = ConfigDiagnostic::from(agg);
    assert_eq!(diag.message, "[Write] on 'outputs.file'");

    let empty = ConfigDiagnostic::from(AggregateError { errors: Vec::new() });
    assert!(empty.source.is_none());
}
