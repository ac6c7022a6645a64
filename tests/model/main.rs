//! Integration tests for Layer 1: Model
//!
//! Tests for entities, parts, the placement tree and consistency checks.

mod entities;
mod placements;
