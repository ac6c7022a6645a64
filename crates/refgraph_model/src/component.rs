//! Parts that can be attached to an entity.
//!
//! Every part carries a back-reference to its owning entity. On the wire the
//! back-reference is always the last field and is named [`ENTITY_FIELD`], which
//! lets code holding an untyped [`refgraph_foundation::Obj`] find it without
//! knowing the concrete part type.

use refgraph_foundation::{Field, Handle, Reflect, Value};

use crate::entity::Entity;

/// Wire name of every part's back-reference to its entity.
pub const ENTITY_FIELD: &str = "entity";

/// A component attached to an entity.
pub trait Part: Reflect {
    /// The owning entity, if attached.
    fn entity(&self) -> Option<&Handle<Entity>>;

    /// Replaces the back-reference.
    fn set_entity(&mut self, entity: Option<Handle<Entity>>);
}

/// A circular collision shape.
#[derive(Debug, Default)]
pub struct Collider {
    /// Radius in world units.
    pub radius: f64,
    entity: Option<Handle<Entity>>,
}

impl Part for Collider {
    fn entity(&self) -> Option<&Handle<Entity>> {
        self.entity.as_ref()
    }

    fn set_entity(&mut self, entity: Option<Handle<Entity>>) {
        self.entity = entity;
    }
}

impl Reflect for Collider {
    const TYPE_NAME: &'static str = "CircleCollider";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "radius",
            get: |c| Value::Float(c.radius),
            set: |c, v| {
                c.radius = v.to_float()?;
                Ok(())
            },
        },
        Field {
            name: ENTITY_FIELD,
            get: |c| c.entity.clone().into(),
            set: |c, v| {
                c.entity = v.to_handle()?;
                Ok(())
            },
        },
    ];
}

/// An image drawn at the entity's placement.
#[derive(Debug, Default)]
pub struct Sprite {
    /// Image file, if one has been assigned.
    pub file_name: Option<String>,
    entity: Option<Handle<Entity>>,
}

impl Part for Sprite {
    fn entity(&self) -> Option<&Handle<Entity>> {
        self.entity.as_ref()
    }

    fn set_entity(&mut self, entity: Option<Handle<Entity>>) {
        self.entity = entity;
    }
}

impl Reflect for Sprite {
    const TYPE_NAME: &'static str = "Sprite";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "file_name",
            get: |s| s.file_name.clone().into(),
            set: |s, v| {
                s.file_name = v.to_optional_string()?;
                Ok(())
            },
        },
        Field {
            name: ENTITY_FIELD,
            get: |s| s.entity.clone().into(),
            set: |s, v| {
                s.entity = v.to_handle()?;
                Ok(())
            },
        },
    ];
}
