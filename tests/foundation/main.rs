//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Obj handles, field tables, the type registry
//! and Error.

mod errors;
mod values;
