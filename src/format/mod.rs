//! Serializer abstraction for output plugins.
//!
//! This module provides:
//! - `FormatKind`: Enum representing the supported data formats
//! - `FormatError`: Errors that can occur while building or running a serializer
//! - `Serializer`: Trait turning one `PageView` into bytes
//! - `FormatRegistry`: Registry resolving a `data_format` name to a serializer
//! - `CustomFormat`: Support for user-defined formats

use std::fmt;

mod custom;
mod json;
mod template;
#[cfg(feature = "xml")]
mod xml;
#[cfg(feature = "yaml")]
mod yaml;

pub use custom::{CustomFormat, CustomSerializer};
pub use json::JsonSerializer;
pub use template::TemplateSerializer;
#[cfg(feature = "xml")]
pub use xml::XmlSerializer;
#[cfg(feature = "yaml")]
pub use yaml::YamlSerializer;

use thiserror::Error;

use crate::model::PageView;

/// Format used when an output does not set `data_format`.
pub const DEFAULT_DATA_FORMAT: &str = "json";

/// Represents the data formats an output can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// One JSON document per line
    Json,
    /// One YAML document per page view
    Yaml,
    /// One XML element per line
    Xml,
    /// Text rendered from `data_format_template`
    Template,
    /// Custom format with a unique name
    Custom(&'static str),
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Json => write!(f, "json"),
            FormatKind::Yaml => write!(f, "yaml"),
            FormatKind::Xml => write!(f, "xml"),
            FormatKind::Template => write!(f, "template"),
            FormatKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FormatKind {
    /// Parse a built-in format kind from its configuration name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(FormatKind::Json),
            "yaml" | "yml" => Some(FormatKind::Yaml),
            "xml" => Some(FormatKind::Xml),
            "template" => Some(FormatKind::Template),
            _ => None,
        }
    }

    /// Check if this format is compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            #[cfg(feature = "yaml")]
            FormatKind::Yaml => true,
            #[cfg(not(feature = "yaml"))]
            FormatKind::Yaml => false,

            #[cfg(feature = "xml")]
            FormatKind::Xml => true,
            #[cfg(not(feature = "xml"))]
            FormatKind::Xml => false,

            FormatKind::Json | FormatKind::Template => true,

            // Availability of custom formats is determined by registration
            FormatKind::Custom(_) => true,
        }
    }
}

/// Errors that can occur while building a serializer or serializing a record.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The requested format is neither built in nor registered
    #[error("unsupported data format: {0}")]
    UnknownFormat(String),

    /// Format feature not enabled
    #[error("Format '{0}' is not enabled. Enable the corresponding feature.")]
    NotEnabled(FormatKind),

    /// The template format was requested without a template
    #[error("data_format_template is required when data_format is \"template\"")]
    MissingTemplate,

    /// The template could not be parsed or rendered
    #[error("template error: {0}")]
    Template(String),

    /// I/O error during format operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error from the underlying encoder
    #[error("Serde error: {0}")]
    Serde(Box<dyn std::error::Error + Send + Sync>),

    /// Other format-specific error
    #[error("Format error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Converts one page view into the bytes an output writes.
pub trait Serializer: Send + Sync + fmt::Debug {
    /// The format this serializer produces.
    fn kind(&self) -> FormatKind;

    /// Serialize a single page view, including any record terminator.
    fn serialize(&self, view: &PageView) -> Result<Vec<u8>, FormatError>;
}

/// Serializer settings extracted from an output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    pub data_format: String,
    pub data_format_template: Option<String>,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            data_format: DEFAULT_DATA_FORMAT.to_string(),
            data_format_template: None,
        }
    }
}

/// Registry for the formats outputs may request, including custom formats.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    /// Built-in format kinds
    formats: Vec<FormatKind>,
    /// Custom format handlers
    custom_formats: Vec<CustomFormat>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
            custom_formats: Vec::new(),
        }
    }

    /// Register a built-in format.
    pub fn register(&mut self, kind: FormatKind) {
        if !self.formats.contains(&kind) {
            self.formats.push(kind);
        }
    }

    /// Register a built-in format (builder pattern).
    pub fn with_format(mut self, kind: FormatKind) -> Self {
        self.register(kind);
        self
    }

    /// Register a custom format handler.
    ///
    /// A later registration with the same name replaces the earlier handler.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use za_outputs::format::{CustomFormat, FormatRegistry};
    ///
    /// let mut registry = FormatRegistry::new();
    /// registry.register_custom(CustomFormat::new("ids").with_serialize(|value| {
    ///     Ok(format!("{}\n", value["tracking_id"]).into_bytes())
    /// }));
    /// ```
    pub fn register_custom(&mut self, format: CustomFormat) {
        let kind = FormatKind::Custom(format.name);
        if !self.formats.contains(&kind) {
            self.formats.push(kind);
        }
        self.custom_formats.retain(|f| f.name != format.name);
        self.custom_formats.push(format);
    }

    /// Register a custom format handler (builder pattern).
    pub fn with_custom_format(mut self, format: CustomFormat) -> Self {
        self.register_custom(format);
        self
    }

    /// Check if a format is registered.
    pub fn has_format(&self, kind: &FormatKind) -> bool {
        self.formats.contains(kind)
    }

    /// Get the custom format handler registered under `name`.
    pub fn get_custom(&self, name: &str) -> Option<&CustomFormat> {
        self.custom_formats.iter().find(|f| f.name == name)
    }

    /// Get all registered format kinds.
    pub fn formats(&self) -> &[FormatKind] {
        &self.formats
    }

    /// Resolve a `data_format` name to a registered, available format.
    pub fn resolve(&self, name: &str) -> Result<FormatKind, FormatError> {
        if let Some(kind) = FormatKind::from_name(name) {
            if !kind.is_available() {
                return Err(FormatError::NotEnabled(kind));
            }
            if self.has_format(&kind) {
                return Ok(kind);
            }
            return Err(FormatError::UnknownFormat(name.to_string()));
        }

        self.get_custom(name)
            .map(|custom| FormatKind::Custom(custom.name))
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
    }

    /// Build the serializer described by `config`.
    pub fn new_serializer(
        &self,
        config: &SerializerConfig,
    ) -> Result<Box<dyn Serializer>, FormatError> {
        let kind = self.resolve(&config.data_format)?;

        match kind {
            FormatKind::Json => Ok(Box::new(JsonSerializer)),

            #[cfg(feature = "yaml")]
            FormatKind::Yaml => Ok(Box::new(YamlSerializer)),

            #[cfg(feature = "xml")]
            FormatKind::Xml => Ok(Box::new(XmlSerializer)),

            FormatKind::Template => {
                let source = config
                    .data_format_template
                    .as_deref()
                    .ok_or(FormatError::MissingTemplate)?;
                Ok(Box::new(TemplateSerializer::parse(source)?))
            }

            FormatKind::Custom(name) => {
                let custom = self
                    .get_custom(name)
                    .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))?;
                Ok(Box::new(CustomSerializer::new(custom.clone())))
            }

            #[allow(unreachable_patterns)]
            _ => Err(FormatError::NotEnabled(kind)),
        }
    }
}

/// Create a default registry with all enabled formats.
pub fn default_registry() -> FormatRegistry {
    let mut registry = FormatRegistry::new();

    registry.register(FormatKind::Json);
    registry.register(FormatKind::Template);

    #[cfg(feature = "yaml")]
    registry.register(FormatKind::Yaml);

    #[cfg(feature = "xml")]
    registry.register(FormatKind::Xml);

    registry
}
