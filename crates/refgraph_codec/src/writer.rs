//! Serializer: values to text.
//!
//! The writer walks a value depth-first. The first time it meets an object it
//! assigns the next id and writes `#id{ type: "Name", field: value, ... }`;
//! every later occurrence of the same object is written as a bare `#id`. That
//! rule is what lets cycles and shared references terminate.

use std::collections::HashMap;
use std::fmt::Write;

use log::trace;
use refgraph_foundation::{Error, ErrorContext, Obj, Result, Value};

use crate::config::WriterConfig;

/// Serializes values into a [`std::fmt::Write`] sink.
///
/// Ids are local to one writer: each call to [`Writer::write_value`] on the
/// same writer continues the numbering and shares the identity table.
pub struct Writer<W> {
    out: W,
    config: WriterConfig,
    /// Objects already written, keyed by identity.
    ids: HashMap<Obj, u32>,
    indent_level: usize,
    depth: usize,
}

impl<W: Write> Writer<W> {
    /// Creates a writer over `out`.
    #[must_use]
    pub fn new(out: W, config: WriterConfig) -> Self {
        Self {
            out,
            config,
            ids: HashMap::new(),
            indent_level: 0,
            depth: 0,
        }
    }

    /// Number of distinct objects written so far.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.ids.len()
    }

    /// Consumes the writer, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one value.
    ///
    /// # Errors
    /// Returns `UnsupportedValue` for non-finite floats, `LimitExceeded` if
    /// nesting passes the configured depth, or `Io` if the sink fails.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        self.write_value_in(value)
            .map_err(|e| e.with_context(ErrorContext::new()))
    }

    fn write_value_in(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.emit("null"),
            Value::Bool(true) => self.emit("True"),
            Value::Bool(false) => self.emit("False"),
            Value::Int(n) => self.emit(&n.to_string()),
            Value::Float(f) => {
                let text = format_float(*f)?;
                self.emit(&text)
            }
            Value::String(s) => {
                self.emit("\"")?;
                self.emit(s)?;
                self.emit("\"")
            }
            Value::List(items) => self.write_list(items),
            Value::Object(obj) => self.write_object(obj),
        }
    }

    fn write_list(&mut self, items: &[Value]) -> Result<()> {
        if items.is_empty() {
            return self.emit(if self.config.pretty { "[ ]" } else { "[]" });
        }

        self.enter()?;
        self.emit(if self.config.pretty { "[ " } else { "[" })?;
        self.indent_level += 1;
        self.newline()?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(if self.config.pretty { ", " } else { "," })?;
            }
            self.write_value_in(item)?;
        }
        self.indent_level -= 1;
        self.newline()?;
        self.emit(if self.config.pretty { " ]" } else { "]" })?;
        self.depth -= 1;
        Ok(())
    }

    fn write_object(&mut self, obj: &Obj) -> Result<()> {
        if let Some(&id) = self.ids.get(obj) {
            trace!("#{id} already written, emitting reference");
            return self.emit(&format!("#{id}"));
        }

        let id = u32::try_from(self.ids.len())
            .map_err(|_| Error::unsupported_value("more objects than ids"))?;
        self.ids.insert(obj.clone(), id);
        trace!("assigned #{id} to {}", obj.type_name());

        self.enter()?;
        self.emit(&format!("#{id}{{"))?;
        self.indent_level += 1;
        self.newline()?;
        self.write_field("type", &Value::from(obj.type_name()), id, true)?;
        for (name, value) in obj.fields() {
            self.write_field(name, &value, id, false)?;
        }
        self.indent_level -= 1;
        self.newline()?;
        self.emit("}")?;
        self.depth -= 1;
        Ok(())
    }

    /// Writes `name: value`, preceded by a separator unless it is the first field.
    fn write_field(&mut self, name: &str, value: &Value, id: u32, first: bool) -> Result<()> {
        self.write_field_in(name, value, first)
            .map_err(|e| e.with_context(ErrorContext::new().with_object(id).with_field(name)))
    }

    fn write_field_in(&mut self, name: &str, value: &Value, first: bool) -> Result<()> {
        if !first {
            self.emit(",")?;
            self.newline()?;
        }
        self.emit(name)?;
        self.emit(if self.config.pretty { ": " } else { ":" })?;
        self.write_value_in(value)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(Error::limit_exceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn newline(&mut self) -> Result<()> {
        if !self.config.pretty {
            return Ok(());
        }
        self.emit("\n")?;
        for _ in 0..self.indent_level * self.config.indent_width {
            self.emit(" ")?;
        }
        Ok(())
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.out
            .write_str(text)
            .map_err(|e| Error::io(format!("failed to write output: {e}")))
    }
}

/// Formats a float so that reading it back yields the same bits.
///
/// Integral values keep a `.0` so they read back as floats rather than ints.
///
/// # Errors
/// Returns `UnsupportedValue` for NaN and infinities, which have no literal.
pub fn format_float(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(Error::unsupported_value(format!("non-finite float {value}")));
    }
    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    Ok(text)
}
