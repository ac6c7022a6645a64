//! Refgraph - Reference-preserving text serialization for object graphs
//!
//! This crate re-exports all layers of the refgraph system and offers entry
//! points bound to the default registry of model types. For detailed
//! documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: refgraph_codec      - Writer, Reader, layout and depth configuration
//! Layer 1: refgraph_model      - Entity, Placement, Collider, Sprite
//! Layer 0: refgraph_foundation - Core types (Value, Obj, Reflect, TypeRegistry, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use refgraph::model::{EntityHandle, create_entity};
//! use refgraph::{Value, deserialize, serialize};
//!
//! let root = create_entity("root", None);
//! let _child = create_entity("child", Some(&root.placement().unwrap()));
//!
//! let text = serialize(&Value::from(root.clone())).unwrap();
//! let copy = deserialize(&text).unwrap();
//! assert_eq!(serialize(&copy).unwrap(), text);
//! # root.destroy().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use refgraph_codec as codec;
pub use refgraph_foundation as foundation;
pub use refgraph_model as model;

pub use refgraph_foundation::{Error, ErrorKind, Handle, Obj, Result, TypeRegistry, Value};

use std::io::{Read, Write};
use std::sync::OnceLock;

use refgraph_codec::{ReaderConfig, WriterConfig};

/// The registry holding every model type, built on first use.
#[must_use]
pub fn default_registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(refgraph_model::registry)
}

/// Serializes `value` with the default layout.
///
/// # Errors
/// Returns `UnsupportedValue` for non-finite floats or `LimitExceeded` for
/// nesting deeper than the default bound.
pub fn serialize(value: &Value) -> Result<String> {
    refgraph_codec::to_string(value)
}

/// Serializes `value` into a byte stream with the default layout.
///
/// # Errors
/// As [`serialize`], plus `Io` if the stream fails.
pub fn serialize_to<W: Write>(value: &Value, out: W) -> Result<()> {
    refgraph_codec::to_writer(out, value, &WriterConfig::default())
}

/// Deserializes a value, constructing objects from the default registry.
///
/// # Errors
/// Returns the reader's error for malformed text, unknown type or field
/// names, or values a field rejects.
pub fn deserialize(text: &str) -> Result<Value> {
    refgraph_codec::from_str(text, default_registry())
}

/// Deserializes a value from a byte stream.
///
/// # Errors
/// As [`deserialize`], plus `Io` if the stream fails.
pub fn deserialize_from<R: Read>(input: R) -> Result<Value> {
    refgraph_codec::from_reader(input, default_registry(), &ReaderConfig::default())
}

/// Deep-copies a graph by writing and reading it back.
///
/// The copy shares no objects with `value`, but keeps its internal sharing and
/// cycles.
///
/// # Errors
/// As [`serialize`] and [`deserialize`].
pub fn clone_graph(value: &Value) -> Result<Value> {
    let text = refgraph_codec::to_string_with(value, &WriterConfig::compact())?;
    deserialize(&text)
}
