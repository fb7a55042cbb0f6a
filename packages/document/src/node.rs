//! Builder document model
//!
//! A document is a versioned tree of typed nodes. The serialized shape is
//! JSON-compatible and consumed by the persistence and rendering layers:
//!
//! ```text
//! BuilderTree := { builderVersion: int, root: NodeJSON }
//! NodeJSON    := { id, type, props, style, actions, meta, children }
//! ```
//!
//! Children are `Arc`-shared. Structural edits never mutate a node in place;
//! they rebuild the spine from the root to the edited node and share every
//! untouched subtree by reference, so any previously held root remains a
//! complete, unchanged document.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version pin for the serialized tree shape. Trees carrying a different
/// version are flagged by [`validate_builder_tree`](crate::validate_builder_tree);
/// migration between versions is an external collaborator's job.
pub const CURRENT_BUILDER_VERSION: u32 = 1;

/// A single element of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderNode {
    /// Unique within the owning tree. Assigned at creation, never reused.
    pub id: String,

    /// Key into the component registry. Unresolved types are tolerated at
    /// read time and treated as opaque by the algebra.
    #[serde(rename = "type")]
    pub node_type: String,

    /// Loosely-typed props, validated against the registered component's
    /// schema (not here).
    #[serde(default)]
    pub props: IndexMap<String, Value>,

    #[serde(default)]
    pub style: StyleSheet,

    /// Event bindings. The payload shape is enforced by the action registry;
    /// the tree algebra carries these opaquely.
    #[serde(default)]
    pub actions: Vec<ActionBinding>,

    /// Free-form annotations (e.g. a human-readable name). No structural
    /// meaning.
    #[serde(default)]
    pub meta: IndexMap<String, Value>,

    /// Exclusively owned by this parent: no sharing across parents, no
    /// back-references.
    #[serde(default)]
    pub children: Vec<Arc<BuilderNode>>,
}

impl BuilderNode {
    /// Copy of this node with a different child list; all other fields are
    /// cloned as-is. This is the spine-rebuild primitive of the algebra.
    pub(crate) fn with_children(&self, children: Vec<Arc<BuilderNode>>) -> BuilderNode {
        BuilderNode {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
            props: self.props.clone(),
            style: self.style.clone(),
            actions: self.actions.clone(),
            meta: self.meta.clone(),
            children,
        }
    }
}

/// Per-node styling: a mandatory `base` entry plus responsive-breakpoint
/// overrides, serialized as one flat object:
/// `{ "base": {...}, "mobile": {...} }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    pub base: IndexMap<String, Value>,

    /// Breakpoint name (e.g. `mobile`) to style-property overrides.
    #[serde(flatten)]
    pub breakpoints: IndexMap<String, IndexMap<String, Value>>,
}

/// An event wired to an action payload: `{ event, action: { type, ...params } }`.
///
/// The payload stays a raw [`Value`] here; `type`-specific parameter shape is
/// validated by the action registry before a binding is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBinding {
    pub event: String,
    pub action: Value,
}

/// The full document: a versioned root node plus all descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderTree {
    #[serde(rename = "builderVersion")]
    pub builder_version: u32,
    pub root: Arc<BuilderNode>,
}

impl BuilderTree {
    /// Wrap a root node at [`CURRENT_BUILDER_VERSION`].
    pub fn new(root: BuilderNode) -> Self {
        Self {
            builder_version: CURRENT_BUILDER_VERSION,
            root: Arc::new(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_json_shape() {
        let node = BuilderNode {
            id: "n1".to_string(),
            node_type: "Heading".to_string(),
            props: IndexMap::from([("text".to_string(), json!("Hello"))]),
            style: StyleSheet::default(),
            actions: vec![],
            meta: IndexMap::new(),
            children: vec![],
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "Heading");
        assert_eq!(value["props"]["text"], "Hello");
        assert!(value["style"]["base"].is_object());
        assert!(value["children"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_style_breakpoints_flatten() {
        let json = json!({
            "base": { "color": "#111" },
            "mobile": { "fontSize": "14px" }
        });

        let style: StyleSheet = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(style.base["color"], "#111");
        assert_eq!(style.breakpoints["mobile"]["fontSize"], "14px");

        // Breakpoints flatten back into the same object on serialization
        assert_eq!(serde_json::to_value(&style).unwrap(), json);
    }

    #[test]
    fn test_tree_version_field_name() {
        let tree = BuilderTree::new(BuilderNode {
            id: "root".to_string(),
            node_type: "Page".to_string(),
            props: IndexMap::new(),
            style: StyleSheet::default(),
            actions: vec![],
            meta: IndexMap::new(),
            children: vec![],
        });

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["builderVersion"], CURRENT_BUILDER_VERSION);
        assert_eq!(value["root"]["id"], "root");
    }
}
