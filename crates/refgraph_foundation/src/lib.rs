//! Core types for refgraph: values, object handles, field tables, errors.
//!
//! This crate provides:
//! - [`Value`] - The value type written and read by the codec
//! - [`Obj`] / [`Handle`] - Shared references to complex instances
//! - [`Reflect`] / [`Field`] - Per-type serialized field tables
//! - [`TypeRegistry`] - Type name to constructor mapping
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod object;
pub mod registry;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use object::{Field, Handle, Obj, Object, Reflect};
pub use registry::{Constructor, TypeRegistry};
pub use types::Type;
pub use value::Value;
