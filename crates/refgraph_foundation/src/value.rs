//! Core value type for everything that flows through the codec.

use std::fmt;

use crate::error::{Error, Result};
use crate::object::{Handle, Obj, Reflect};
use crate::types::Type;

/// A serializable value.
///
/// Primitives and lists are plain values: cloning a list copies it, and two
/// equal lists are indistinguishable. Objects are shared references; two
/// object values are equal only if they refer to the same instance.
#[derive(Clone, Default)]
pub enum Value {
    /// The null value (absent reference or unset string).
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered, possibly heterogeneous list.
    List(Vec<Value>),
    /// Reference to a complex object.
    Object(Obj),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::List(_) => Type::list(Type::Any),
            Self::Object(_) => Type::Object,
        }
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract an object reference.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Obj> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Coercions used by field setters
    // -------------------------------------------------------------------------

    /// Checks that a field of type `expected` can take this value.
    ///
    /// # Errors
    /// Returns `TypeMismatch` naming both types if `expected` does not accept
    /// the value's type.
    pub fn check_type(&self, expected: &Type) -> Result<()> {
        let actual = self.value_type();
        if expected.accepts(&actual) {
            Ok(())
        } else {
            Err(Error::type_mismatch(expected.clone(), actual))
        }
    }

    /// Converts to a boolean.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is a boolean.
    pub fn to_bool(&self) -> Result<bool> {
        self.check_type(&Type::Bool)?;
        Ok(matches!(self, Self::Bool(true)))
    }

    /// Converts to an integer.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is an integer.
    pub fn to_int(&self) -> Result<i64> {
        self.check_type(&Type::Int)?;
        Ok(self.as_int().unwrap_or_default())
    }

    /// Converts to a float, widening integers.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is numeric.
    pub fn to_float(&self) -> Result<f64> {
        self.check_type(&Type::Float)?;
        Ok(self.as_number().unwrap_or_default())
    }

    /// Converts to an owned string.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is a string.
    pub fn to_string_value(&self) -> Result<String> {
        self.check_type(&Type::String)?;
        Ok(self.as_str().unwrap_or_default().to_owned())
    }

    /// Converts to an optional string; null maps to `None`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is a string or null.
    pub fn to_optional_string(&self) -> Result<Option<String>> {
        self.check_type(&Type::option(Type::String))?;
        Ok(self.as_str().map(str::to_owned))
    }

    /// Converts to an optional untyped object; null maps to `None`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is an object or null.
    pub fn to_optional_object(&self) -> Result<Option<Obj>> {
        self.check_type(&Type::option(Type::Object))?;
        Ok(self.as_object().cloned())
    }

    /// Converts to a list of untyped objects.
    ///
    /// # Errors
    /// Returns `TypeMismatch` unless the value is a list whose elements are
    /// all objects.
    pub fn to_object_list(&self) -> Result<Vec<Obj>> {
        self.check_type(&Type::list(Type::Object))?;
        self.as_list()
            .unwrap_or_default()
            .iter()
            .map(|item| match item {
                Self::Object(obj) => Ok(obj.clone()),
                other => Err(Error::type_mismatch(Type::Object, other.value_type())),
            })
            .collect()
    }

    /// Converts to an optional typed handle; null maps to `None`.
    ///
    /// # Errors
    /// Returns `TypeMismatch` for non-objects and `ObjectTypeMismatch` for
    /// objects of another type.
    pub fn to_handle<T: Reflect>(&self) -> Result<Option<Handle<T>>> {
        self.to_optional_object()?
            .map(Handle::from_obj)
            .transpose()
    }

    /// Converts to a list of typed handles.
    ///
    /// # Errors
    /// As [`Value::to_object_list`], plus `ObjectTypeMismatch` for elements of
    /// another type.
    pub fn to_handle_list<T: Reflect>(&self) -> Result<Vec<Handle<T>>> {
        self.to_object_list()?
            .into_iter()
            .map(Handle::from_obj)
            .collect()
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => f.debug_list().entries(items).finish(),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(obj) => write!(f, "<{}>", obj.type_name()),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Obj> for Value {
    fn from(obj: Obj) -> Self {
        Self::Object(obj)
    }
}

impl<T> From<Handle<T>> for Value {
    fn from(handle: Handle<T>) -> Self {
        Self::Object(handle.into_obj())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
