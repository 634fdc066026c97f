//! Typed data binding: hydrate loosely-typed key/value data into typed value
//! objects, and flatten them back.
//!
//! Given a [`descriptor::TypeDescriptor`] for the target shape and a dynamic
//! [`value::ValueMap`], the [`hydrate::Hydrator`] performs constructor- or
//! field-based construction with automatic coercion across primitives,
//! enums, date/time values, nested object graphs, and union-typed members.
//! [`flatten::flatten`] is the inverse direction.
//!
//! Design goals:
//! - Coerce rather than reject wherever a reasonable conversion exists;
//!   failures that remain are typed errors, never panics.
//! - No runtime reflection: type shapes are explicit descriptors registered
//!   up front in a read-only [`registry::Registry`].
//! - Hydration and flattening are pure functions of their inputs; concurrent
//!   calls over a shared registry need no coordination.

pub mod coerce;
pub mod descriptor;
pub mod error;
pub mod flatten;
pub mod hydrate;
pub mod json;
pub mod keys;
pub mod registry;
pub mod value;

pub use coerce::coerce;
pub use descriptor::{
    ConstructionMode, DateTimeKind, EnumDescriptor, MemberDescriptor, TypeDescriptor, TypeExpr,
};
pub use error::BindError;
pub use flatten::flatten;
pub use hydrate::Hydrator;
pub use registry::{Registry, TypeEntry};
pub use value::{Backing, EnumValue, Instance, Value, ValueMap};
