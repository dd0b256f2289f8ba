//! Tests for assembling a Config from TOML documents.

use std::collections::HashMap;

use crate::config::{Config, ConfigLoader, DEFAULT_BADGE, GlobalConfig};
use crate::error::ConfigError;
use crate::format::{CustomFormat, FormatError, default_registry};
use crate::outputs::{OutputRegistry, default_outputs};

fn load(text: &str) -> Result<Config, ConfigError> {
    Config::from_str_with(text, &default_outputs())
}

fn output_cause(err: ConfigError) -> (String, ConfigError) {
    match err {
        ConfigError::Output { name, source } => (name, *source),
        other => panic!("expected an output error, got: {other:?}"),
    }
}

#[test]
fn empty_document_yields_defaults() {
    let config = load("").unwrap();
    assert_eq!(config.global, GlobalConfig::default());
    assert!(config.trackers.is_empty());
    assert!(config.outputs.is_empty());
}

#[test]
fn global_section_is_mapped() {
    let config = load(
        r#"
[global]
geo_ip_database = "/var/opt/geo.mmdb"
tags = { dc = "eu-west", env = "prod" }
"#,
    )
    .unwrap();

    assert_eq!(config.global.geo_ip_database, "/var/opt/geo.mmdb");
    let expected: HashMap<String, String> = [("dc", "eu-west"), ("env", "prod")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(config.global.tags, expected);
}

#[test]
fn global_must_be_a_table() {
    let err = load("global = \"nope\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSection("global")));
    assert_eq!(
        err.to_string(),
        "invalid configuration, error parsing global table"
    );
}

#[test]
fn global_field_errors_name_the_section() {
    let err = load("[global]\ngeo_ip_database = 42\n").unwrap_err();
    assert!(matches!(err, ConfigError::Global(_)));
    assert!(err.to_string().starts_with("error parsing global table: "));
}

#[test]
fn tracker_without_badge_gets_the_default() {
    let config = load("[[trackers]]\ntracking_id = \"UA-1\"\n").unwrap();
    assert_eq!(config.trackers.len(), 1);
    assert_eq!(config.trackers[0].badge, DEFAULT_BADGE);
    assert_eq!(config.trackers[0].badge, "ZerØ|analytics|#00a5da");
}

#[test]
fn tracker_badge_is_kept_verbatim() {
    let config = load(
        r##"
[[trackers]]
tracking_id = "UA-1"
website = "https://example.org"
badge = "MyApp|tracking|#ff0000"
"##,
    )
    .unwrap();

    let tracker = config.tracker("UA-1").unwrap();
    assert_eq!(tracker.badge, "MyApp|tracking|#ff0000");
    assert_eq!(tracker.website, "https://example.org");
}

#[test]
fn malformed_badge_aborts_the_load() {
    let err = load(
        r#"
[[trackers]]
tracking_id = "UA-1"

[[trackers]]
tracking_id = "UA-2"
badge = "MyApp|tracking"
"#,
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("\"<title>|<label>|<color>\""), "{message}");
    assert!(message.ends_with("got: MyApp|tracking"), "{message}");
    match err {
        ConfigError::Tracker(inner) => {
            assert!(matches!(*inner, ConfigError::InvalidBadge(ref b) if b == "MyApp|tracking"))
        }
        other => panic!("expected tracker error, got: {other:?}"),
    }
}

#[test]
fn trackers_must_be_an_array_of_tables() {
    let err = load("[trackers]\ntracking_id = \"UA-1\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSection("trackers")));

    let err = load("trackers = \"UA-1\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSection("trackers")));
}

#[test]
fn unknown_tracker_keys_are_ignored() {
    let config = load("[[trackers]]\ntracking_id = \"UA-1\"\nsampling = 0.5\n").unwrap();
    assert_eq!(config.trackers[0].tracking_id, "UA-1");
}

#[test]
fn tracker_lookup_returns_the_first_match() {
    let config = load(
        r#"
[[trackers]]
tracking_id = "UA-1"
website = "first"

[[trackers]]
tracking_id = "UA-1"
website = "second"
"#,
    )
    .unwrap();

    assert_eq!(config.trackers.len(), 2);
    assert_eq!(config.tracker("UA-1").unwrap().website, "first");
    assert!(config.tracker("UA-404").is_none());
}

#[test]
fn unregistered_output_is_reported_by_name() {
    let err = load("[[outputs.nonexistent]]\n").unwrap_err();
    assert!(err.to_string().contains("nonexistent"));

    let (name, cause) = output_cause(err);
    assert_eq!(name, "nonexistent");
    assert!(matches!(cause, ConfigError::UndefinedOutput(ref n) if n == "nonexistent"));
    assert_eq!(
        cause.to_string(),
        "undefined but requested output: nonexistent"
    );
}

#[test]
fn outputs_must_be_a_table() {
    let err = load("outputs = 1").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSection("outputs")));
}

#[test]
fn output_entries_must_be_arrays_of_tables() {
    let err = load("[outputs.file]\nfiles = [\"stdout\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedOutputFormat(ref n) if n == "file"));
    assert_eq!(err.to_string(), "unsupported output config format: file");
}

#[test]
fn file_output_accepts_serializer_fields() {
    let config = load(
        r#"
[[outputs.file]]
files = ["stdout"]
data_format = "json"
"#,
    )
    .unwrap();

    assert_eq!(config.outputs.len(), 1);
    assert_eq!(config.outputs[0].name, "file");
    assert_eq!(config.outputs[0].output.description(), "Send page view to file(s)");
}

#[test]
fn outputs_without_serializer_keep_data_format() {
    let err = load("[[outputs.blackhole]]\ndata_format = \"json\"\n").unwrap_err();
    let (name, cause) = output_cause(err);
    assert_eq!(name, "blackhole");
    assert!(matches!(cause, ConfigError::Settings(_)));
}

#[test]
fn unknown_plugin_fields_are_rejected() {
    let err = load("[[outputs.file]]\nfilez = [\"stdout\"]\n").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error parsing file array, "), "{message}");
    assert!(matches!(output_cause(err).1, ConfigError::Settings(_)));
}

#[test]
fn serializer_failures_are_wrapped_with_the_plugin_name() {
    let err = load("[[outputs.file]]\ndata_format = \"msgpack\"\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "error parsing file array, unsupported data format: msgpack"
    );
    assert!(matches!(
        output_cause(err).1,
        ConfigError::Serializer(FormatError::UnknownFormat(_))
    ));
}

#[test]
fn outputs_keep_declaration_order() {
    let config = load(
        r#"
[[outputs.file]]
files = ["stdout"]

[[outputs.file]]
data_format = "template"
data_format_template = "{{tracking_id}}"

[[outputs.blackhole]]
"#,
    )
    .unwrap();

    let names: Vec<&str> = config.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["file", "file", "blackhole"]);
}

#[test]
fn earlier_phase_failure_stops_later_phases() {
    let err = load(
        r#"
[[trackers]]
tracking_id = "UA-1"
badge = "broken"

[[outputs.nonexistent]]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Tracker(_)));
}

#[test]
fn first_failing_output_aborts_the_phase() {
    let err = load(
        r#"
[[outputs.file]]
data_format = "msgpack"

[[outputs.nonexistent]]
"#,
    )
    .unwrap_err();
    assert_eq!(output_cause(err).0, "file");
}

#[test]
fn empty_registry_knows_no_outputs() {
    let err = Config::from_str_with("[[outputs.file]]\n", &OutputRegistry::new()).unwrap_err();
    assert!(matches!(
        output_cause(err).1,
        ConfigError::UndefinedOutput(_)
    ));
}

#[test]
fn loader_uses_the_given_format_registry() {
    let outputs = default_outputs();
    let formats = default_registry().with_custom_format(
        CustomFormat::new("ids").with_serialize(|value| Ok(value.to_string().into_bytes())),
    );
    let loader = ConfigLoader::new(&outputs, &formats);

    let config = loader
        .load_str("[[outputs.file]]\ndata_format = \"ids\"\n")
        .unwrap();
    assert_eq!(config.outputs.len(), 1);

    assert!(load("[[outputs.file]]\ndata_format = \"ids\"\n").is_err());
}

#[test]
fn loading_twice_yields_equal_settings() {
    let text = r#"
[global]
geo_ip_database = "geo.mmdb"
tags = { a = "1" }

[[trackers]]
tracking_id = "UA-1"

[[trackers]]
tracking_id = "UA-2"
badge = "x|y|z"

[[outputs.blackhole]]
"#;
    let first = load(text).unwrap();
    let second = load(text).unwrap();

    assert_eq!(first.global, second.global);
    assert_eq!(first.trackers, second.trackers);
    assert_eq!(first.outputs.len(), second.outputs.len());
}

#[test]
fn load_file_expands_environment_and_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("za.toml");
    std::fs::write(
        &path,
        "[[trackers]]\ntracking_id = \"UA-1\"\nwebsite = \"$ZA_TEST_UNSET_VARIABLE\"\n",
    )
    .unwrap();

    let config = Config::load_file(&path, &default_outputs()).unwrap();
    assert_eq!(config.trackers[0].website, "");

    let err = Config::load_file(dir.path().join("missing.toml"), &default_outputs()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn tracker_without_id_loads_with_an_empty_id() {
    let config = load("[[trackers]]\nbadge = \"a|b|c\"\n").unwrap();
    assert_eq!(config.trackers.len(), 1);
    assert_eq!(config.trackers[0].tracking_id, "");
    assert_eq!(config.trackers[0].badge, "a|b|c");
}

#[test]
fn wrapped_field_errors_end_without_a_line_break() {
    let err = load("[[trackers]]\ntracking_id = 5\n").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error parsing trackers array, "), "{message}");
    assert!(!message.ends_with('\n'), "{message:?}");

    let err = load("[global]\ngeo_ip_database = 42\n").unwrap_err();
    assert!(!err.to_string().ends_with('\n'), "{err:?}");
}

#[test]
fn empty_inline_output_array_is_rejected() {
    let err = load("[outputs]\nfile = []\n").unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedOutputFormat(ref n) if n == "file"));

    // an empty trackers array is still just "no trackers"
    assert!(load("trackers = []").unwrap().trackers.is_empty());
}
