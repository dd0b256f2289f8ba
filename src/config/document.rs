//! Generic document tree for parsed configuration.
//!
//! A parsed TOML document is classified into three shapes so that the
//! assembler can check section structure before any typed mapping happens:
//! nested tables, arrays of tables, and plain values (scalars and inline
//! arrays). Key order follows the source document.

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// One entry of a document table.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested table (`[section]` or an inline table)
    Table(Table),
    /// An array of tables (`[[section]]`); an empty array is classified here too
    Tables(Vec<Table>),
    /// Any other value
    Value(toml::Value),
}

impl Node {
    fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::Table(table) => Node::Table(Table::from_toml(table)),
            toml::Value::Array(items) if items.iter().all(toml::Value::is_table) => Node::Tables(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        toml::Value::Table(table) => Some(Table::from_toml(table)),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Node::Value(other),
        }
    }

    fn into_toml(self) -> toml::Value {
        match self {
            Node::Table(table) => toml::Value::Table(table.into_toml()),
            Node::Tables(tables) => {
                toml::Value::Array(tables.into_iter().map(|t| toml::Value::Table(t.into_toml())).collect())
            }
            Node::Value(value) => value,
        }
    }

    /// The string value of this node, if it is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Value(toml::Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// An ordered key/value table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    fields: Vec<(String, Node)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document into a table.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(text).map_err(ConfigError::Parse)?;
        Ok(Self::from_toml(table))
    }

    pub fn from_toml(table: toml::Table) -> Self {
        Self {
            fields: table
                .into_iter()
                .map(|(key, value)| (key, Node::from_toml(value)))
                .collect(),
        }
    }

    pub fn into_toml(self) -> toml::Table {
        self.fields
            .into_iter()
            .map(|(key, node)| (key, node.into_toml()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// String value under `key`; absent and non-string values both yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace `key`, keeping the position of an existing entry.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.fields.push((key, node)),
        }
    }

    /// A copy of this table without the given keys.
    pub fn without(&self, keys: &[&str]) -> Table {
        Table {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.fields.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Map this table onto a typed structure by field name.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, toml::de::Error> {
        toml::Value::Table(self.clone().into_toml()).try_into()
    }
}

impl FromIterator<(String, Node)> for Table {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, node) in iter {
            table.insert(key, node);
        }
        table
    }
}
