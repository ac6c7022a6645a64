//! Reference-preserving text codec for refgraph object graphs.
//!
//! This crate provides:
//! - [`Writer`] - Serializes values, writing each object once and `#id` after
//! - [`Reader`] - Rebuilds values, resolving `#id` back to the same instance
//! - [`WriterConfig`] / [`ReaderConfig`] - Layout and nesting limits
//!
//! The text form:
//!
//! ```text
//! value      := "null" | "True" | "False" | integer | float | string | list | objectref
//! list       := "[" (value ("," value)*)? "]"
//! objectref  := "#" integer [ "{" "type" ":" string ("," field)* "}" ]
//! field      := identifier ":" value
//! ```
//!
//! Whitespace is allowed between any two tokens. Strings are written verbatim
//! between double quotes with no escaping, so a string containing `"` does not
//! read back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod cursor;
pub mod reader;
pub mod stream;
pub mod writer;

pub use config::{ReaderConfig, WriterConfig};
pub use reader::Reader;
pub use stream::{from_reader, load_from_file, save_to_file, to_writer};
pub use writer::{Writer, format_float};

use log::debug;
use refgraph_foundation::{Result, TypeRegistry, Value};

/// Serializes `value` with the default pretty layout.
///
/// # Errors
/// See [`Writer::write_value`].
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with(value, &WriterConfig::default())
}

/// Serializes `value` with the given layout.
///
/// # Errors
/// See [`Writer::write_value`].
pub fn to_string_with(value: &Value, config: &WriterConfig) -> Result<String> {
    let mut writer = Writer::new(String::new(), config.clone());
    writer.write_value(value)?;
    let objects = writer.object_count();
    let text = writer.into_inner();
    debug!("serialized {objects} objects into {} bytes", text.len());
    Ok(text)
}

/// Deserializes one value, constructing objects through `registry`.
///
/// # Errors
/// See [`Reader::read_document`].
pub fn from_str(source: &str, registry: &TypeRegistry) -> Result<Value> {
    from_str_with(source, registry, &ReaderConfig::default())
}

/// Deserializes one value with the given limits.
///
/// # Errors
/// See [`Reader::read_document`].
pub fn from_str_with(source: &str, registry: &TypeRegistry, config: &ReaderConfig) -> Result<Value> {
    let mut reader = Reader::new(source, registry, config.clone());
    let value = reader.read_document()?;
    debug!(
        "deserialized {} objects from {} bytes",
        reader.object_count(),
        source.len()
    );
    Ok(value)
}
