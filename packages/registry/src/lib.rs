//! # Pagefab Registry
//!
//! Process-wide vocabularies for the builder document:
//!
//! - [`ComponentRegistry`]: node `type` to schema, defaults, palette
//!   category and nesting rule.
//! - [`ActionRegistry`]: event-action tags to parameter schemas; the single
//!   enforcement point for action payload shape.
//! - [`CollectionRegistry`]: named field-typed schemas backing CMS data
//!   bindings.
//!
//! Registries are plain values with an explicit registration phase: the host
//! populates them (normally through the plugin loader) before any tree
//! editing begins, then treats them as read-only. Nothing here registers
//! itself as an import-time side effect, and concurrent steady-state reads
//! need no locking.

mod actions;
mod binding;
mod collections;
mod components;
mod error;
mod schema;

pub use actions::{ActionDefinition, ActionRegistry};
pub use binding::{DataBinding, BINDING_KEY};
pub use collections::{
    CollectionDefinition, CollectionFieldDefinition, CollectionRegistry, CollectionSchema,
};
pub use components::{ComponentDefinition, ComponentRegistry, DefaultPropsFailure};
pub use error::{RegistryError, SchemaError, SchemaViolation};
pub use schema::{FieldKind, FieldSpec, Schema};
