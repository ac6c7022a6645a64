//! Entities: named containers of parts.
//!
//! An entity exclusively owns its parts and every part points back at its
//! entity, so the model is cyclic from the start. Exactly one part is expected
//! to be a [`Placement`]; that is only checked by
//! [`EntityHandle::check_consistency`], never on mutation.

use std::collections::HashSet;
use std::fmt;

use refgraph_foundation::{Error, Field, Handle, Obj, Reflect, Result, Value};

use crate::component::{ENTITY_FIELD, Part};
use crate::placement::{Placement, PlacementHandle};

/// A named container of parts.
#[derive(Debug)]
pub struct Entity {
    /// Display name; not required to be unique.
    pub name: String,
    /// Attached parts, in attachment order.
    parts: Vec<Obj>,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            name: "unnamed entity".to_string(),
            parts: Vec::new(),
        }
    }
}

impl Entity {
    /// Attached parts, in attachment order.
    #[must_use]
    pub fn parts(&self) -> &[Obj] {
        &self.parts
    }
}

impl Reflect for Entity {
    const TYPE_NAME: &'static str = "Entity";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "name",
            get: |e| Value::from(e.name.clone()),
            set: |e, v| {
                e.name = v.to_string_value()?;
                Ok(())
            },
        },
        Field {
            name: "parts",
            get: |e| Value::from(e.parts.clone()),
            set: |e, v| {
                e.parts = v.to_object_list()?;
                Ok(())
            },
        },
    ];
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity {}", self.name)
    }
}

/// Creates an entity with a fresh placement part.
///
/// If `parent` is given the new placement is appended to its children and
/// points back at it; otherwise the new placement is a root.
#[must_use]
pub fn create_entity(name: &str, parent: Option<&Handle<Placement>>) -> Handle<Entity> {
    let entity = Handle::new(Entity {
        name: name.to_string(),
        parts: Vec::new(),
    });
    let placement = entity.add_part::<Placement>();
    if let Some(parent) = parent {
        parent.borrow_mut().push_child(placement.clone());
        placement.borrow_mut().set_parent(Some(parent.clone()));
    }
    entity
}

/// Operations on a shared entity.
pub trait EntityHandle {
    /// The entity's name.
    fn name(&self) -> String;

    /// Renames the entity.
    fn set_name(&self, name: &str);

    /// Snapshot of the attached parts.
    fn parts(&self) -> Vec<Obj>;

    /// Returns the first part of type `P`.
    ///
    /// # Errors
    /// Returns `PartNotFound` if the entity has no such part.
    fn get_part<P: Part>(&self) -> Result<Handle<P>>;

    /// Attaches a default `P`, pointing its back-reference at this entity.
    fn add_part<P: Part>(&self) -> Handle<P>;

    /// Shortcut for `get_part::<Placement>()`.
    ///
    /// # Errors
    /// Returns `PartNotFound` if the entity has no placement.
    fn placement(&self) -> Result<Handle<Placement>>;

    /// Walks this entity and its descendants checking structural invariants.
    ///
    /// # Errors
    /// Returns `Inconsistent` if an entity lacks a placement, a part does not
    /// point back at its entity, a child placement's parent is not the
    /// placement listing it, or the placement tree loops.
    fn check_consistency(&self) -> Result<()>;

    /// Tears down this entity and its descendants.
    ///
    /// Clears every part's back-reference, every placement's links and the
    /// parts lists, releasing the reference cycles that keep the graph alive.
    ///
    /// # Errors
    /// Returns an error if a part rejects having its back-reference cleared.
    fn destroy(&self) -> Result<()>;
}

impl EntityHandle for Handle<Entity> {
    fn name(&self) -> String {
        self.borrow().name.clone()
    }

    fn set_name(&self, name: &str) {
        self.borrow_mut().name = name.to_string();
    }

    fn parts(&self) -> Vec<Obj> {
        self.borrow().parts.clone()
    }

    fn get_part<P: Part>(&self) -> Result<Handle<P>> {
        let entity = self.borrow();
        match entity.parts.iter().find(|part| part.is::<P>()) {
            Some(part) => Handle::from_obj(part.clone()),
            None => Err(Error::part_not_found(entity.name.clone(), P::TYPE_NAME)),
        }
    }

    fn add_part<P: Part>(&self) -> Handle<P> {
        let part = Handle::new(P::default());
        part.borrow_mut().set_entity(Some(self.clone()));
        self.borrow_mut().parts.push(part.obj().clone());
        part
    }

    fn placement(&self) -> Result<Handle<Placement>> {
        self.get_part::<Placement>()
    }

    fn check_consistency(&self) -> Result<()> {
        check_entity(self, &mut HashSet::new())
    }

    fn destroy(&self) -> Result<()> {
        let parts = std::mem::take(&mut self.borrow_mut().parts);
        for part in &parts {
            if let Some(mut placement) = part.borrow_mut::<Placement>() {
                let children = placement.take_children();
                placement.set_parent(None);
                drop(placement);
                for child in children {
                    child.borrow_mut().set_parent(None);
                    let owner = child.borrow().entity().cloned();
                    if let Some(owner) = owner {
                        owner.destroy()?;
                    }
                }
            }
            part.set_field(ENTITY_FIELD, Value::Null)?;
        }
        Ok(())
    }
}

fn check_entity(entity: &Handle<Entity>, visited: &mut HashSet<usize>) -> Result<()> {
    let name = entity.name();
    if !visited.insert(entity.obj().addr()) {
        return Err(Error::inconsistent(format!(
            "entity {name} is reachable twice from the placement tree"
        )));
    }

    let placement = entity
        .placement()
        .map_err(|_| Error::inconsistent(format!("entity {name} has no placement part")))?;

    for part in entity.parts() {
        let points_back = part_owner(&part).is_some_and(|owner| owner.ptr_eq(entity.obj()));
        if !points_back {
            return Err(Error::inconsistent(format!(
                "{} part of entity {name} does not point back at it",
                part.type_name()
            )));
        }
    }

    for child in placement.children() {
        let parent_ok = child.parent().is_some_and(|p| p.ptr_eq(&placement));
        if !parent_ok {
            return Err(Error::inconsistent(format!(
                "child placement of entity {name} has a different parent"
            )));
        }
        let owner = child.entity().ok_or_else(|| {
            Error::inconsistent(format!("child placement of entity {name} has no entity"))
        })?;
        check_entity(&owner, visited)?;
    }

    Ok(())
}

/// The entity a part points back at, read through its `entity` field.
fn part_owner(part: &Obj) -> Option<Obj> {
    part.fields()
        .into_iter()
        .find(|(name, _)| *name == ENTITY_FIELD)
        .and_then(|(_, value)| value.as_object().cloned())
}
