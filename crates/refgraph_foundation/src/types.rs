//! Type descriptors for field validation.

use std::fmt;

/// Type descriptor for a serialized field or value.
///
/// Used to describe what a field setter expects and what a value actually is,
/// so mismatches can be reported with both sides named.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The null type (only value: null).
    Null,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// List with the given element type.
    List(Box<Type>),
    /// Reference to a complex object.
    Object,
    /// Optional type (value or null).
    Option(Box<Type>),
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Returns true if this type is `Any`.
    #[must_use]
    const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Checks if a value type is accepted by this type.
    ///
    /// - `Any` accepts all types
    /// - `Option(T)` accepts `Null` and anything `T` accepts
    /// - `Float` accepts `Int` (integer literals widen into float fields)
    /// - Lists check element types recursively
    #[must_use]
    pub fn accepts(&self, value_type: &Type) -> bool {
        if matches!(self, Self::Any) {
            return true;
        }

        if let Self::Option(inner) = self {
            return matches!(value_type, Self::Null) || inner.accepts(value_type);
        }

        match (self, value_type) {
            (Self::Null, Self::Null)
            | (Self::Bool, Self::Bool)
            | (Self::Int | Self::Float, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::String, Self::String)
            | (Self::Object, Self::Object) => true,

            // A runtime list reports List(Any); its elements are checked one by one
            // during conversion.
            (Self::List(expected), Self::List(actual)) => {
                actual.is_any() || expected.accepts(actual)
            }

            _ => false,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::List(elem) => write!(f, "[{elem:?}]"),
            Self::Object => write!(f, "object"),
            Self::Option(inner) => write!(f, "{inner:?}?"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
