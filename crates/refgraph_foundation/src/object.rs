//! Shared object handles and per-type field tables.
//!
//! Complex instances live behind [`Obj`], a reference-counted, interior-mutable
//! handle. Two handles are the same object when they point at the same
//! allocation; field values never enter into identity.
//!
//! Instead of runtime introspection every concrete type implements [`Reflect`],
//! which names the type and lists its serialized fields in a fixed order. The
//! blanket [`Object`] impl turns that table into the type-erased interface the
//! codec works against.

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

/// One serialized field of a concrete type.
pub struct Field<T: 'static> {
    /// Name used on the wire.
    pub name: &'static str,
    /// Reads the current value of the field.
    pub get: fn(&T) -> Value,
    /// Replaces the field with a decoded value.
    pub set: fn(&mut T, Value) -> Result<()>,
}

/// A concrete type that can be written and rebuilt by name.
///
/// `FIELDS` is ordered: the type's own fields in declaration order, then any
/// fields it shares with the family it belongs to (for parts, the owning
/// entity back-reference comes last).
pub trait Reflect: Any + Default {
    /// Name written in the `type:` header; unique within a registry.
    const TYPE_NAME: &'static str;
    /// Serialized fields, in output order.
    const FIELDS: &'static [Field<Self>];
}

/// Type-erased view of a reflected instance.
pub trait Object: Any {
    /// Concrete type name.
    fn type_name(&self) -> &'static str;

    /// Names of the serialized fields, in output order.
    fn field_names(&self) -> Vec<&'static str>;

    /// Snapshot of every serialized field, in output order.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Sets a field by name.
    ///
    /// # Errors
    /// Returns `UnknownField` if the type has no such field, or the setter's
    /// error if the value has the wrong shape.
    fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Upcasts for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Object::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Reflect> Object for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn field_names(&self) -> Vec<&'static str> {
        T::FIELDS.iter().map(|field| field.name).collect()
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        T::FIELDS
            .iter()
            .map(|field| (field.name, (field.get)(self)))
            .collect()
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        let field = T::FIELDS
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| Error::unknown_field(T::TYPE_NAME, name))?;
        (field.set)(self, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Obj
// =============================================================================

/// Shared handle to a complex instance of any reflected type.
#[derive(Clone)]
pub struct Obj(Rc<Slot<dyn Object>>);

/// The allocation behind an [`Obj`].
///
/// The concrete type is recorded outside the cell so it can be queried while
/// the instance is mutably borrowed, as it is when a setter receives a
/// reference to the object being populated.
struct Slot<O: ?Sized> {
    type_id: TypeId,
    type_name: &'static str,
    cell: RefCell<O>,
}

impl Obj {
    /// Allocates a new object.
    #[must_use]
    pub fn new<T: Object>(value: T) -> Self {
        let slot: Rc<Slot<dyn Object>> = Rc::new(Slot {
            type_id: TypeId::of::<T>(),
            type_name: value.type_name(),
            cell: RefCell::new(value),
        });
        Self(slot)
    }

    /// Returns true if both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation.
    ///
    /// Stable for as long as any handle to the object is alive.
    #[must_use]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>().addr()
    }

    /// Concrete type name of the instance.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name
    }

    /// Returns true if the instance is a `T`.
    #[must_use]
    pub fn is<T: Object>(&self) -> bool {
        self.0.type_id == TypeId::of::<T>()
    }

    /// Borrows the instance as a `T`, or `None` if it is some other type.
    #[must_use]
    pub fn borrow<T: Object>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.0.cell.borrow(), |o| o.as_any().downcast_ref::<T>()).ok()
    }

    /// Mutably borrows the instance as a `T`, or `None` if it is some other type.
    #[must_use]
    pub fn borrow_mut<T: Object>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.0.cell.borrow_mut(), |o| o.as_any_mut().downcast_mut::<T>()).ok()
    }

    /// Snapshot of the serialized fields.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, Value)> {
        self.0.cell.borrow().fields()
    }

    /// Sets one field by name.
    ///
    /// # Errors
    /// See [`Object::set_field`].
    pub fn set_field(&self, name: &str, value: Value) -> Result<()> {
        self.0.cell.borrow_mut().set_field(name, value)
    }
}

impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Obj {}

impl Hash for Obj {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} @{:#x}>", self.type_name(), self.addr())
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Typed view of an [`Obj`] known to hold a `T`.
pub struct Handle<T> {
    obj: Obj,
    marker: PhantomData<fn() -> T>,
}

impl<T: Reflect> Handle<T> {
    /// Allocates a new object and returns a typed handle to it.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            obj: Obj::new(value),
            marker: PhantomData,
        }
    }

    /// Narrows an untyped handle.
    ///
    /// # Errors
    /// Returns `ObjectTypeMismatch` if the object is not a `T`.
    pub fn from_obj(obj: Obj) -> Result<Self> {
        if obj.is::<T>() {
            Ok(Self {
                obj,
                marker: PhantomData,
            })
        } else {
            Err(Error::object_type_mismatch(T::TYPE_NAME, obj.type_name()))
        }
    }

    /// Borrows the instance.
    ///
    /// # Panics
    /// Panics if the object is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.obj
            .borrow::<T>()
            .expect("handle type is checked at construction")
    }

    /// Mutably borrows the instance.
    ///
    /// # Panics
    /// Panics if the object is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.obj
            .borrow_mut::<T>()
            .expect("handle type is checked at construction")
    }
}

impl<T> Handle<T> {
    /// The untyped handle.
    #[must_use]
    pub fn obj(&self) -> &Obj {
        &self.obj
    }

    /// Consumes the typed handle, returning the untyped one.
    #[must_use]
    pub fn into_obj(self) -> Obj {
        self.obj
    }

    /// Returns true if both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.obj.ptr_eq(&other.obj)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            obj: self.obj.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.obj, f)
    }
}

impl<T> From<Handle<T>> for Obj {
    fn from(handle: Handle<T>) -> Self {
        handle.obj
    }
}
