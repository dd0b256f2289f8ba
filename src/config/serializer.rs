//! Serializer construction from an output table.

use super::document::Table;
use crate::format::{DEFAULT_DATA_FORMAT, FormatError, FormatRegistry, Serializer, SerializerConfig};

pub const DATA_FORMAT_KEY: &str = "data_format";
pub const DATA_FORMAT_TEMPLATE_KEY: &str = "data_format_template";

/// Read the serializer settings of one output element.
///
/// Non-string values are ignored, and an absent or empty `data_format` falls
/// back to `json`.
pub fn serializer_config(table: &Table) -> SerializerConfig {
    let data_format = table
        .get_str(DATA_FORMAT_KEY)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DATA_FORMAT)
        .to_string();
    let data_format_template = table.get_str(DATA_FORMAT_TEMPLATE_KEY).map(str::to_string);

    SerializerConfig {
        data_format,
        data_format_template,
    }
}

/// Build the serializer for one output element.
///
/// Returns the serializer together with a copy of `table` that no longer
/// contains `data_format` or `data_format_template`; `table` itself is left
/// untouched.
pub fn build_serializer(
    formats: &FormatRegistry,
    table: &Table,
) -> Result<(Box<dyn Serializer>, Table), FormatError> {
    let config = serializer_config(table);
    let serializer = formats.new_serializer(&config)?;
    let remaining = table.without(&[DATA_FORMAT_KEY, DATA_FORMAT_TEMPLATE_KEY]);
    Ok((serializer, remaining))
}
