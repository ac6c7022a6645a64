//! Deserializer: text to values.
//!
//! A recursive-descent reader with one character of lookahead. Dispatch is on
//! the next non-whitespace character:
//!
//! | char             | reads                                  |
//! |------------------|----------------------------------------|
//! | `#`              | object definition or reference         |
//! | `[`              | list                                   |
//! | `"`              | string                                 |
//! | digit, `-`, `.`  | number                                 |
//! | letter           | `null`, `True` or `False`              |
//!
//! When an object id is seen for the first time, a default instance of the
//! named type is entered in the identity table before any field is read, so a
//! field that refers back to the object being read resolves to that same
//! instance.

use std::collections::HashMap;

use log::trace;
use refgraph_foundation::{Error, ErrorContext, Obj, Result, TypeRegistry, Value};

use crate::config::ReaderConfig;
use crate::cursor::Cursor;

/// Reads values from text, constructing objects through a [`TypeRegistry`].
pub struct Reader<'src, 'reg> {
    cursor: Cursor<'src>,
    registry: &'reg TypeRegistry,
    config: ReaderConfig,
    /// Objects read so far, by id.
    objects: HashMap<u32, Obj>,
    depth: usize,
}

impl<'src, 'reg> Reader<'src, 'reg> {
    /// Creates a reader over `source`.
    #[must_use]
    pub fn new(source: &'src str, registry: &'reg TypeRegistry, config: ReaderConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            registry,
            config,
            objects: HashMap::new(),
            depth: 0,
        }
    }

    /// Number of distinct objects read so far.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Reads the next value.
    ///
    /// # Errors
    /// Returns `EndOfStream` if input runs out mid-value, `Format` or
    /// `UnknownToken` for malformed text, `UnknownType` / `UnknownField` for
    /// names the registry cannot satisfy, a setter's `TypeMismatch`, or
    /// `LimitExceeded` if nesting passes the configured depth. Every error
    /// carries the enclosing object id and the line and column reached.
    pub fn read_value(&mut self) -> Result<Value> {
        self.read_value_in(None)
    }

    /// Reads a value that must be the whole of the remaining input.
    ///
    /// # Errors
    /// As [`Reader::read_value`], plus `Format` if anything other than
    /// whitespace follows the value.
    pub fn read_document(&mut self) -> Result<Value> {
        let value = self.read_value()?;
        self.cursor.skip_whitespace();
        if let Some(c) = self.cursor.peek_char() {
            return Err(self.error(
                Error::format(format!("unexpected {c:?} after end of value")),
                None,
            ));
        }
        Ok(value)
    }

    fn read_value_in(&mut self, enclosing: Option<u32>) -> Result<Value> {
        self.cursor.skip_whitespace();
        match self.cursor.peek_char() {
            None => Err(self.error(Error::end_of_stream("a value"), enclosing)),
            Some('#') => self.read_object(enclosing).map(Value::Object),
            Some('[') => self.read_list(enclosing),
            Some('"') => self.read_string(enclosing).map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.read_number(enclosing),
            Some(c) if c.is_alphabetic() => self.read_special_name(enclosing),
            Some(c) => Err(self.error(
                Error::format(format!("unexpected character {c:?}")),
                enclosing,
            )),
        }
    }

    fn read_special_name(&mut self, enclosing: Option<u32>) -> Result<Value> {
        match self.read_token() {
            "null" => Ok(Value::Null),
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            other => {
                let err = Error::unknown_token(other);
                Err(self.error(err, enclosing))
            }
        }
    }

    fn read_number(&mut self, enclosing: Option<u32>) -> Result<Value> {
        let token = self
            .cursor
            .take_while(|c| c.is_ascii_digit() || c == '.' || c == '-');
        if let Ok(n) = token.parse::<i64>() {
            return Ok(Value::Int(n));
        }
        match token.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => {
                let err = Error::format(format!("bad number {token:?}"));
                Err(self.error(err, enclosing))
            }
        }
    }

    fn read_string(&mut self, enclosing: Option<u32>) -> Result<String> {
        self.cursor.advance(); // opening quote
        let text = self.cursor.take_while(|c| c != '"');
        if !self.cursor.eat('"') {
            return Err(self.error(Error::end_of_stream("a string"), enclosing));
        }
        Ok(text.to_string())
    }

    fn read_list(&mut self, enclosing: Option<u32>) -> Result<Value> {
        self.enter(enclosing)?;
        self.cursor.advance(); // [
        let mut items = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek_char() {
                None => return Err(self.error(Error::end_of_stream("a list"), enclosing)),
                Some(']') => break,
                Some(_) => {}
            }
            items.push(self.read_value_in(enclosing)?);
            self.expect_separator(']', "a list", enclosing)?;
        }
        self.cursor.advance(); // ]
        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn read_object(&mut self, enclosing: Option<u32>) -> Result<Obj> {
        self.cursor.advance(); // #
        let id = self.read_id(enclosing)?;

        if let Some(obj) = self.objects.get(&id) {
            trace!("#{id} resolved to existing {}", obj.type_name());
            return Ok(obj.clone());
        }

        self.cursor.skip_whitespace();
        match self.cursor.advance() {
            Some('{') => {}
            None => {
                let err = Error::end_of_stream(format!("reference to unknown id #{id}"));
                return Err(self.error(err, enclosing));
            }
            Some(c) => {
                let err = Error::format(format!("expected '{{' after #{id}, found {c:?}"));
                return Err(self.error(err, enclosing));
            }
        }
        self.enter(enclosing)?;

        let type_name = self.read_type_header(id)?;
        let obj = self
            .registry
            .construct(&type_name)
            .map_err(|e| self.error(e, Some(id)))?;
        self.objects.insert(id, obj.clone());
        trace!("#{id} registered as {type_name}");

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek_char() {
                None => return Err(self.error(Error::end_of_stream("an object"), Some(id))),
                Some('}') => break,
                Some(_) => {}
            }
            let (name, value) = self.read_field(id)?;
            obj.set_field(&name, value).map_err(|e| {
                let ctx = self.context(Some(id)).with_field(name.as_str());
                e.with_context(ctx)
            })?;
            self.expect_separator('}', "an object", Some(id))?;
        }
        self.cursor.advance(); // }
        self.depth -= 1;
        Ok(obj)
    }

    /// Reads the mandatory leading `type: "Name"` field.
    fn read_type_header(&mut self, id: u32) -> Result<String> {
        let (name, value) = self.read_field(id)?;
        if name != "type" {
            let err = Error::format(format!("expected type name first in #{id}, found field {name}"));
            return Err(self.error(err, Some(id)));
        }
        match value {
            Value::String(type_name) => {
                self.expect_separator('}', "an object", Some(id))?;
                Ok(type_name)
            }
            other => {
                let err = Error::format(format!("type of #{id} must be a string, found {other}"));
                Err(self.error(err, Some(id)))
            }
        }
    }

    /// Reads `name: value`.
    fn read_field(&mut self, id: u32) -> Result<(String, Value)> {
        self.cursor.skip_whitespace();
        let name = self.cursor.take_while(is_field_char).to_string();
        if name.is_empty() {
            return Err(match self.cursor.peek_char() {
                None => self.error(Error::end_of_stream("a field name"), Some(id)),
                Some(c) => self.error(
                    Error::format(format!("expected a field name, found {c:?}")),
                    Some(id),
                ),
            });
        }

        self.cursor.skip_whitespace();
        match self.cursor.advance() {
            Some(':') => {}
            None => {
                let err = Error::end_of_stream(format!("field {name}"));
                return Err(self.error(err, Some(id)));
            }
            Some(_) => {
                let err = Error::format(format!("expected a colon after {name}"));
                return Err(self.error(err, Some(id)));
            }
        }

        let value = self.read_value_in(Some(id))?;
        Ok((name, value))
    }

    /// After an element, consumes a `,` or leaves `close` for the caller.
    fn expect_separator(&mut self, close: char, what: &str, enclosing: Option<u32>) -> Result<()> {
        self.cursor.skip_whitespace();
        match self.cursor.peek_char() {
            Some(',') => {
                self.cursor.advance();
                Ok(())
            }
            Some(c) if c == close => Ok(()),
            Some(c) => Err(self.error(
                Error::format(format!("expected ',' or '{close}' in {what}, found {c:?}")),
                enclosing,
            )),
            None => Err(self.error(Error::end_of_stream(what), enclosing)),
        }
    }

    fn read_id(&mut self, enclosing: Option<u32>) -> Result<u32> {
        let token = self.read_token();
        token.parse::<u32>().map_err(|_| {
            let err = Error::format(format!("bad object id {token:?}"));
            self.error(err, enclosing)
        })
    }

    /// Reads a maximal run of letters, digits, `.` and `-`.
    fn read_token(&mut self) -> &'src str {
        self.cursor
            .take_while(|c| c.is_alphanumeric() || c == '.' || c == '-')
    }

    fn enter(&mut self, enclosing: Option<u32>) -> Result<()> {
        if self.depth >= self.config.max_depth {
            let err = Error::limit_exceeded(self.config.max_depth);
            return Err(self.error(err, enclosing));
        }
        self.depth += 1;
        Ok(())
    }

    fn context(&self, enclosing: Option<u32>) -> ErrorContext {
        let ctx = ErrorContext::new().with_position(self.cursor.line(), self.cursor.column());
        match enclosing {
            Some(id) => ctx.with_object(id),
            None => ctx,
        }
    }

    fn error(&self, err: Error, enclosing: Option<u32>) -> Error {
        err.with_context(self.context(enclosing))
    }
}

fn is_field_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
