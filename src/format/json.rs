//! JSON serializer.

use super::{FormatError, FormatKind, Serializer};
use crate::model::PageView;

/// Writes each page view as a single-line JSON document followed by `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::Json
    }

    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        let mut bytes = serde_json::to_vec(view).map_err(|e| FormatError::Serde(Box::new(e)))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
