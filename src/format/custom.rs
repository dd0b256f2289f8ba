//! Custom format support for user-defined serializers.
//!
//! This module allows applications to register their own data formats
//! without modifying the core library.

use std::sync::Arc;

use super::{FormatError, FormatKind, Serializer};
use crate::model::PageView;

/// Type alias for custom serialize function.
///
/// Takes the page view as a `serde_json::Value` and returns serialized bytes.
pub type SerializeFn =
    Arc<dyn Fn(&serde_json::Value) -> Result<Vec<u8>, FormatError> + Send + Sync>;

/// A custom format handler that can be registered with the FormatRegistry.
///
/// # Example
///
/// ```rust,ignore
/// use za_outputs::format::{CustomFormat, FormatError};
///
/// let toml_format = CustomFormat::new("toml").with_serialize(|value| {
///     toml::to_string(value)
///         .map(|s| s.into_bytes())
///         .map_err(|e| FormatError::Serde(Box::new(e)))
/// });
///
/// registry.register_custom(toml_format);
/// ```
#[derive(Clone)]
pub struct CustomFormat {
    /// Unique name for this format, matched against `data_format`
    pub name: &'static str,
    /// Serialize function
    pub serialize_fn: Option<SerializeFn>,
}

impl std::fmt::Debug for CustomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomFormat")
            .field("name", &self.name)
            .field("has_serialize", &self.serialize_fn.is_some())
            .finish()
    }
}

impl CustomFormat {
    /// Create a new custom format with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            serialize_fn: None,
        }
    }

    /// Set the serialize function.
    pub fn with_serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<Vec<u8>, FormatError> + Send + Sync + 'static,
    {
        self.serialize_fn = Some(Arc::new(f));
        self
    }

    /// Serialize a page view to bytes.
    pub fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        let serialize_fn = self.serialize_fn.as_ref().ok_or_else(|| {
            FormatError::Other(Box::new(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!(
                    "Custom format '{}' does not support serialization",
                    self.name
                ),
            )))
        })?;

        let json_value =
            serde_json::to_value(view).map_err(|e| FormatError::Serde(Box::new(e)))?;
        serialize_fn(&json_value)
    }
}

/// Serializer backed by a registered `CustomFormat`.
#[derive(Debug, Clone)]
pub struct CustomSerializer {
    format: CustomFormat,
}

impl CustomSerializer {
    pub fn new(format: CustomFormat) -> Self {
        Self { format }
    }
}

impl Serializer for CustomSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::Custom(self.format.name)
    }

    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError> {
        self.format.serialize(view)
    }
}
