//! Template serializer driven by `data_format_template`.
//!
//! Placeholders take the form `{{ field }}` (a leading `.` is accepted, so
//! `{{.path}}` works too). Nested values are addressed with dots, e.g.
//! `{{ tags.campaign }}`. Every rendered record is terminated by `\n`.

use serde_json::Value;

use super::{FormatError, FormatKind, Serializer};
use crate::model::PageView;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Vec<String>),
}

/// Renders each page view through a pre-parsed text template.
#[derive(Debug, Clone)]
pub struct TemplateSerializer {
    source: String,
    segments: Vec<Segment>,
}

impl TemplateSerializer {
    /// Parse a template; fails on unclosed or empty placeholders.
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                FormatError::Template(format!("unclosed placeholder in {source:?}"))
            })?;

            let name = after[..end].trim();
            let name = name.strip_prefix('.').unwrap_or(name);
            if name.is_empty() {
                return Err(FormatError::Template(format!(
                    "empty placeholder in {source:?}"
                )));
            }
            segments.push(Segment::Field(name.split('.').map(str::to_string).collect()));
            rest = &after[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text this serializer was built from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

fn lookup<'v>(root: &'v Value, path: &[String]) -> Result<Option<&'v Value>, FormatError> {
    let Some((first, nested)) = path.split_first() else {
        return Ok(None);
    };

    match root.get(first) {
        Some(value) => Ok(nested
            .iter()
            .try_fold(value, |current, key| current.get(key))),
        // Optional nested maps (e.g. empty tags) are omitted from the record
        None if !nested.is_empty() => Ok(None),
        None => Err(FormatError::Template(format!("unknown field `{first}`"))),
    }
}

fn render_value(out: &mut String, value: Option<&Value>) {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => out.push_str(s),
        Some(other) => out.push_str(&other.to_string()),
    }
}

impl Serializer for TemplateSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::Template
    }

    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        let record = serde_json::to_value(view).map_err(|e| FormatError::Serde(Box::new(e)))?;

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(path) => render_value(&mut out, lookup(&record, path)?),
            }
        }
        out.push('\n');
        Ok(out.into_bytes())
    }
}
