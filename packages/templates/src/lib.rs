//! # Pagefab Templates
//!
//! Named partial/full trees and the theme token transform.
//!
//! Dropping a template into a document is a three-step pipeline owned by the
//! host:
//!
//! ```text
//! TemplateRegistry::instantiate  →  apply_theme  →  insert_node_at
//!   (deep clone, fresh ids)        (var(role) →      (into the live
//!                                   palette value)    document)
//! ```
//!
//! Registered component types are expected to exist for the template's nodes;
//! the strict tree validator is the place that checks the result before
//! commit.

mod registry;
mod theme;

pub use registry::{TemplateDefinition, TemplateError, TemplateRegistry, TemplateTree};
pub use theme::{apply_theme, ThemePalette};
