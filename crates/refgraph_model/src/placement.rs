//! The placement part: 2D coordinates plus parent/child tree links.
//!
//! A parent's `children` list and each child's `parent` pointer together
//! describe the hierarchy. Nothing keeps the two sides in agreement except
//! the operations here; [`crate::EntityHandle::check_consistency`] verifies it.

use refgraph_foundation::{Error, Field, Handle, Reflect, Result, Value};

use crate::component::Part;
use crate::entity::Entity;

/// Position and tree links of an entity.
#[derive(Debug, Default)]
pub struct Placement {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    parent: Option<Handle<Placement>>,
    children: Vec<Handle<Placement>>,
    entity: Option<Handle<Entity>>,
}

impl Placement {
    /// The parent placement, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Handle<Placement>> {
        self.parent.as_ref()
    }

    /// Replaces the parent pointer without touching any children list.
    pub fn set_parent(&mut self, parent: Option<Handle<Placement>>) {
        self.parent = parent;
    }

    /// Child placements, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Handle<Placement>] {
        &self.children
    }

    /// Appends to the children list without touching the child's parent pointer.
    pub fn push_child(&mut self, child: Handle<Placement>) {
        self.children.push(child);
    }

    /// Empties the children list, returning what it held.
    pub fn take_children(&mut self) -> Vec<Handle<Placement>> {
        std::mem::take(&mut self.children)
    }
}

impl Part for Placement {
    fn entity(&self) -> Option<&Handle<Entity>> {
        self.entity.as_ref()
    }

    fn set_entity(&mut self, entity: Option<Handle<Entity>>) {
        self.entity = entity;
    }
}

impl Reflect for Placement {
    const TYPE_NAME: &'static str = "Placement";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "x",
            get: |p| Value::Float(p.x),
            set: |p, v| {
                p.x = v.to_float()?;
                Ok(())
            },
        },
        Field {
            name: "y",
            get: |p| Value::Float(p.y),
            set: |p, v| {
                p.y = v.to_float()?;
                Ok(())
            },
        },
        Field {
            name: "parent",
            get: |p| p.parent.clone().into(),
            set: |p, v| {
                p.parent = v.to_handle()?;
                Ok(())
            },
        },
        Field {
            name: "children",
            get: |p| p.children.clone().into(),
            set: |p, v| {
                p.children = v.to_handle_list()?;
                Ok(())
            },
        },
        Field {
            name: "entity",
            get: |p| p.entity.clone().into(),
            set: |p, v| {
                p.entity = v.to_handle()?;
                Ok(())
            },
        },
    ];
}

/// Tree operations on a shared placement.
pub trait PlacementHandle {
    /// Horizontal coordinate.
    fn x(&self) -> f64;

    /// Vertical coordinate.
    fn y(&self) -> f64;

    /// Moves the placement.
    fn set_position(&self, x: f64, y: f64);

    /// The parent placement, if any.
    fn parent(&self) -> Option<Handle<Placement>>;

    /// The owning entity, if attached.
    fn entity(&self) -> Option<Handle<Entity>>;

    /// Snapshot of the child placements.
    fn children(&self) -> Vec<Handle<Placement>>;

    /// Number of children.
    fn child_count(&self) -> usize;

    /// The child at `index`.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `index >= child_count()`.
    fn child(&self, index: usize) -> Result<Handle<Placement>>;

    /// Replaces the child at `index` and points the new child's parent here.
    ///
    /// The displaced child's parent pointer is cleared if it still points here.
    ///
    /// # Errors
    /// Returns `IndexOutOfBounds` if `index >= child_count()`.
    fn set_child(&self, index: usize, child: &Handle<Placement>) -> Result<()>;

    /// Appends `child` and points its parent here.
    ///
    /// # Errors
    /// Returns `Inconsistent` if `child` already has a parent, or is this
    /// placement.
    fn add_child(&self, child: &Handle<Placement>) -> Result<()>;
}

impl PlacementHandle for Handle<Placement> {
    fn x(&self) -> f64 {
        self.borrow().x
    }

    fn y(&self) -> f64 {
        self.borrow().y
    }

    fn set_position(&self, x: f64, y: f64) {
        let mut placement = self.borrow_mut();
        placement.x = x;
        placement.y = y;
    }

    fn parent(&self) -> Option<Handle<Placement>> {
        self.borrow().parent.clone()
    }

    fn entity(&self) -> Option<Handle<Entity>> {
        self.borrow().entity.clone()
    }

    fn children(&self) -> Vec<Handle<Placement>> {
        self.borrow().children.clone()
    }

    fn child_count(&self) -> usize {
        self.borrow().children.len()
    }

    fn child(&self, index: usize) -> Result<Handle<Placement>> {
        let placement = self.borrow();
        placement
            .children
            .get(index)
            .cloned()
            .ok_or_else(|| Error::index_out_of_bounds(index, placement.children.len()))
    }

    fn set_child(&self, index: usize, child: &Handle<Placement>) -> Result<()> {
        let displaced = {
            let mut placement = self.borrow_mut();
            let length = placement.children.len();
            let slot = placement
                .children
                .get_mut(index)
                .ok_or_else(|| Error::index_out_of_bounds(index, length))?;
            std::mem::replace(slot, child.clone())
        };
        if !displaced.ptr_eq(child) && displaced.parent().is_some_and(|p| p.ptr_eq(self)) {
            displaced.borrow_mut().parent = None;
        }
        child.borrow_mut().parent = Some(self.clone());
        Ok(())
    }

    fn add_child(&self, child: &Handle<Placement>) -> Result<()> {
        if child.ptr_eq(self) {
            return Err(Error::inconsistent("a placement cannot be its own child"));
        }
        if child.borrow().parent.is_some() {
            return Err(Error::inconsistent("placement already has a parent"));
        }
        self.borrow_mut().children.push(child.clone());
        child.borrow_mut().parent = Some(self.clone());
        Ok(())
    }
}
