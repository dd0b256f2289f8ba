//! YAML serializer.

use super::{FormatError, FormatKind, Serializer};
use crate::model::PageView;

/// Writes each page view as its own YAML document, introduced by `---`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSerializer;

impl Serializer for YamlSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::Yaml
    }

    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        let body = serde_yaml::to_string(view).map_err(|e| FormatError::Serde(Box::new(e)))?;
        Ok(format!("---\n{body}").into_bytes())
    }
}
