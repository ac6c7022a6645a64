//! Registry of constructible types.
//!
//! The reader only ever sees a type name in the stream. The registry maps that
//! name to a zero-argument factory producing a default instance, which the
//! reader then populates field by field.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::object::{Obj, Reflect};

/// Zero-argument factory for one registered type.
pub type Constructor = fn() -> Obj;

/// Maps type names to constructors.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    constructors: HashMap<&'static str, Constructor>,
}

impl TypeRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its [`Reflect::TYPE_NAME`].
    ///
    /// Registering the same name twice replaces the earlier constructor.
    pub fn register<T: Reflect>(&mut self) -> &mut Self {
        self.constructors.insert(T::TYPE_NAME, construct::<T>);
        self
    }

    /// Builder form of [`TypeRegistry::register`].
    #[must_use]
    pub fn with<T: Reflect>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Returns true if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Constructs a default instance of the named type.
    ///
    /// # Errors
    /// Returns `UnknownType` if no type with that name is registered.
    pub fn construct(&self, name: &str) -> Result<Obj> {
        self.constructors
            .get(name)
            .map(|construct| construct())
            .ok_or_else(|| Error::unknown_type(name))
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn construct<T: Reflect>() -> Obj {
    Obj::new(T::default())
}
