//! Reading and writing through byte streams and files.
//!
//! The text form is UTF-8. Streams are buffered whole: the reader needs the
//! complete input to resolve references, and writing to a `String` first keeps
//! a failed serialization from leaving half a document in the sink.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use refgraph_foundation::{Error, Result, TypeRegistry, Value};

use crate::config::{ReaderConfig, WriterConfig};

/// Serializes `value` into a byte stream.
///
/// # Errors
/// Returns any serialization error, or `Io` if the stream fails.
pub fn to_writer<W: Write>(mut out: W, value: &Value, config: &WriterConfig) -> Result<()> {
    let text = crate::to_string_with(value, config)?;
    out.write_all(text.as_bytes())
        .map_err(|e| Error::io(format!("failed to write output: {e}")))?;
    out.flush()
        .map_err(|e| Error::io(format!("failed to flush output: {e}")))
}

/// Deserializes one value from a byte stream.
///
/// # Errors
/// Returns `Io` if the stream fails or is not UTF-8, or any reader error.
pub fn from_reader<R: Read>(
    mut input: R,
    registry: &TypeRegistry,
    config: &ReaderConfig,
) -> Result<Value> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|e| Error::io(format!("failed to read input: {e}")))?;
    crate::from_str_with(&text, registry, config)
}

/// Serializes `value` to a file, creating or truncating it.
///
/// # Errors
/// Returns `Io` if the file cannot be created or written, or any
/// serialization error.
pub fn save_to_file<P: AsRef<Path>>(path: P, value: &Value, config: &WriterConfig) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    to_writer(BufWriter::new(file), value, config)
}

/// Deserializes one value from a file.
///
/// # Errors
/// Returns `Io` if the file cannot be opened or read, or any reader error.
pub fn load_from_file<P: AsRef<Path>>(
    path: P,
    registry: &TypeRegistry,
    config: &ReaderConfig,
) -> Result<Value> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_reader(BufReader::new(file), registry, config)
}
