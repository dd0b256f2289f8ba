//! Tests for the generic document tree.

use crate::config::{Node, Table};

const DOC: &str = r#"
[global]
geo_ip_database = "geo.mmdb"

[[trackers]]
tracking_id = "UA-1"

[[trackers]]
tracking_id = "UA-2"

[outputs]
[[outputs.file]]
files = ["stdout"]
empty = []
"#;

#[test]
fn sections_are_classified_by_shape() {
    let root = Table::parse(DOC).unwrap();

    assert!(matches!(root.get("global"), Some(Node::Table(_))));
    match root.get("trackers") {
        Some(Node::Tables(items)) => assert_eq!(items.len(), 2),
        other => panic!("expected array of tables, got {other:?}"),
    }

    let Some(Node::Table(outputs)) = root.get("outputs") else {
        panic!("expected outputs table");
    };
    let Some(Node::Tables(files)) = outputs.get("file") else {
        panic!("expected outputs.file array of tables");
    };
    assert!(matches!(files[0].get("files"), Some(Node::Value(toml::Value::Array(_)))));
    assert!(matches!(files[0].get("empty"), Some(Node::Tables(items)) if items.is_empty()));
}

#[test]
fn keys_keep_document_order() {
    let root = Table::parse("zeta = 1\nalpha = 2\nmid = 3\n").unwrap();
    let keys: Vec<&str> = root.keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn without_returns_filtered_copy() {
    let root = Table::parse("a = \"1\"\nb = \"2\"\nc = \"3\"\n").unwrap();
    let filtered = root.without(&["b", "missing"]);

    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    assert!(root.contains_key("b"));
    assert_eq!(root.len(), 3);
}

#[test]
fn get_str_ignores_non_strings() {
    let root = Table::parse("name = \"json\"\ncount = 3\n").unwrap();
    assert_eq!(root.get_str("name"), Some("json"));
    assert_eq!(root.get_str("count"), None);
    assert_eq!(root.get_str("absent"), None);
}

#[test]
fn unmarshal_maps_fields_by_name() {
    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Settings {
        files: Vec<String>,
        level: i64,
    }

    let root = Table::parse("files = [\"a\", \"b\"]\nlevel = 2\n").unwrap();
    let settings: Settings = root.unmarshal().unwrap();
    assert_eq!(
        settings,
        Settings {
            files: vec!["a".into(), "b".into()],
            level: 2,
        }
    );
}

#[test]
fn insert_replaces_in_place() {
    let mut table = Table::parse("a = 1\nb = 2\n").unwrap();
    table.insert("a", Node::Value(toml::Value::Integer(10)));
    table.insert("c", Node::Value(toml::Value::Integer(3)));

    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(table.get("a"), Some(&Node::Value(toml::Value::Integer(10))));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = Table::parse("[outputs\nfiles = 1").unwrap_err();
    assert!(matches!(err, crate::error::ConfigError::Parse(_)));
}
