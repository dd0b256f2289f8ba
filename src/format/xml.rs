//! XML serializer.

use super::{FormatError, FormatKind, Serializer};
use crate::model::PageView;

/// Writes each page view as one `<PageView>` element per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl Serializer for XmlSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::Xml
    }

    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        let mut xml_string =
            quick_xml::se::to_string(view).map_err(|e| FormatError::Serde(Box::new(e)))?;
        xml_string.push('\n');
        Ok(xml_string.into_bytes())
    }
}
