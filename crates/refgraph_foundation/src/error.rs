//! Error types for the refgraph system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result alias used throughout refgraph.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for refgraph operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context already attached is kept; the innermost location is the useful one.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    /// Creates an end-of-stream error.
    #[must_use]
    pub fn end_of_stream(while_reading: impl Into<String>) -> Self {
        Self::new(ErrorKind::EndOfStream(while_reading.into()))
    }

    /// Creates a format error.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format(message.into()))
    }

    /// Creates an unknown token error.
    #[must_use]
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownToken(token.into()))
    }

    /// Creates an unknown type error.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType(name.into()))
    }

    /// Creates an unknown field error.
    #[must_use]
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        })
    }

    /// Creates an unsupported value error.
    #[must_use]
    pub fn unsupported_value(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedValue(description.into()))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an object type mismatch error.
    #[must_use]
    pub fn object_type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::ObjectTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a part not found error.
    #[must_use]
    pub fn part_not_found(entity: impl Into<String>, part: impl Into<String>) -> Self {
        Self::new(ErrorKind::PartNotFound {
            entity: entity.into(),
            part: part.into(),
        })
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates a consistency violation error.
    #[must_use]
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Inconsistent(message.into()))
    }

    /// Creates a nesting limit error.
    #[must_use]
    pub fn limit_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::LimitExceeded { limit })
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Input ended mid-token, mid-list, mid-object, or mid-string.
    #[error("unexpected end of stream while reading {0}")]
    EndOfStream(String),

    /// A token does not have any of the expected shapes.
    #[error("format error: {0}")]
    Format(String),

    /// A bare word other than `null`, `True` or `False`.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// A `type:` field names a type missing from the registry.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A field name does not exist on the target type.
    #[error("unknown field {field} on type {type_name}")]
    UnknownField {
        /// The type that was being populated.
        type_name: String,
        /// The field name that was not found.
        field: String,
    },

    /// A value has no encoding in the text format.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A field setter received a value of the wrong kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// An object reference points at an instance of the wrong concrete type.
    #[error("expected object of type {expected}, got {actual}")]
    ObjectTypeMismatch {
        /// The expected type name.
        expected: String,
        /// The type name actually found.
        actual: String,
    },

    /// An entity has no part with the requested capability.
    #[error("part not found: {part} on entity {entity}")]
    PartNotFound {
        /// Name of the entity that was queried.
        entity: String,
        /// Type name of the requested part.
        part: String,
    },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the collection.
        length: usize,
    },

    /// An object graph violates a structural invariant.
    #[error("inconsistent object graph: {0}")]
    Inconsistent(String),

    /// Nesting depth limit exceeded.
    #[error("nesting depth limit ({limit}) exceeded")]
    LimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// Reading from or writing to a stream failed.
    #[error("i/o error: {0}")]
    Io(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Id of the object being read or written, if inside one.
    pub object_id: Option<u32>,
    /// Field being read or written.
    pub field: Option<String>,
    /// Line number in the input (1-based).
    pub line: Option<u32>,
    /// Column number in the input (1-based).
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enclosing object id.
    #[must_use]
    pub fn with_object(mut self, id: u32) -> Self {
        self.object_id = Some(id);
        self
    }

    /// Sets the field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_id {
            Some(id) => write!(f, "in object #{id}")?,
            None => write!(f, "at top level")?,
        }
        if let Some(field) = &self.field {
            write!(f, ", field {field}")?;
        }
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, ", at {line}:{col}")?;
        }
        Ok(())
    }
}
