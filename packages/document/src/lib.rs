//! # Pagefab Document
//!
//! Core builder document model and node tree algebra.
//!
//! A [`BuilderTree`] is the editable page document: a versioned root
//! [`BuilderNode`] plus all descendants. Every edit is a pure function that
//! returns a new root with structural sharing, so a host editor can keep any
//! number of snapshots (undo stacks, open tabs) without copies or locks:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host editor: holds a BuilderTree value      │
//! └─────────────────────────────────────────────┘
//!                     ↓ edit
//! ┌─────────────────────────────────────────────┐
//! │ document: node tree algebra                 │
//! │  - create / find / clone                    │
//! │  - update / insert / remove / move (COW)    │
//! │  - flatten / count / validate               │
//! └─────────────────────────────────────────────┘
//!                     ↓ new root
//!            host swaps its reference
//! ```
//!
//! The algebra is generic over node `type` strings and has no dependency on
//! the registries; the [`NodeTypeLookup`] trait is the one seam through which
//! validation resolves component metadata.

mod error;
mod id;
mod node;
mod tree;
mod validate;

pub use error::{StructuralError, TreeValidationError, Violation, ViolationKind};
pub use id::new_node_id;
pub use node::{ActionBinding, BuilderNode, BuilderTree, StyleSheet, CURRENT_BUILDER_VERSION};
pub use tree::{
    clone_node, count_nodes, create_node, create_node_with_children, find_node_by_id,
    find_parent_node, flatten_tree, insert_node_at, move_node, remove_node_from_tree,
    update_node_in_tree,
};
pub use validate::{is_valid_builder_tree, validate_builder_tree, NodeTypeLookup};
