//! Minimal entity graph for refgraph.
//!
//! This crate provides:
//! - [`Entity`] - A named container of parts
//! - [`Placement`] - The part carrying coordinates and parent/child links
//! - [`Collider`], [`Sprite`] - Further parts exercising shared references
//! - [`registry`] - A [`TypeRegistry`] with every type above registered
//!
//! Parts point back at their entity and placements point at both parent and
//! children, so every graph built here is cyclic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod placement;

pub use component::{Collider, ENTITY_FIELD, Part, Sprite};
pub use entity::{Entity, EntityHandle, create_entity};
pub use placement::{Placement, PlacementHandle};

use refgraph_foundation::TypeRegistry;

/// Registers every model type with `registry`.
pub fn register(registry: &mut TypeRegistry) {
    registry
        .register::<Entity>()
        .register::<Placement>()
        .register::<Collider>()
        .register::<Sprite>();
}

/// A registry containing every model type.
#[must_use]
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    register(&mut registry);
    registry
}
