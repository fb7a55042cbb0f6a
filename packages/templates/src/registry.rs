//! Template registry.
//!
//! Templates are named, pre-built partial or full trees registered once and
//! never mutated afterward. Instantiation deep-clones the stored tree with
//! fresh ids, so every use yields ids disjoint from the registry's copy and
//! from every previous instantiation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use indexmap::IndexMap;
use pagefab_document::{clone_node, BuilderNode, BuilderTree};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Duplicate template: {0}")]
    DuplicateTemplate(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

/// A registered tree: either a full versioned document or a bare partial
/// subtree. Both serialize naturally, distinguished by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateTree {
    Full(BuilderTree),
    Partial(Arc<BuilderNode>),
}

impl TemplateTree {
    pub fn root(&self) -> &Arc<BuilderNode> {
        match self {
            TemplateTree::Full(tree) => &tree.root,
            TemplateTree::Partial(node) => node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    /// Gallery grouping, e.g. "hero" or "pricing".
    pub category: String,
    pub tree: TemplateTree,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    definitions: IndexMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: TemplateDefinition) -> Result<(), TemplateError> {
        if self.definitions.contains_key(&definition.id) {
            return Err(TemplateError::DuplicateTemplate(definition.id));
        }
        debug!(template = %definition.id, "registered template");
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.definitions.get(id)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &TemplateDefinition> {
        self.definitions.values()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Deep-clone the stored tree under fresh ids. The stored copy is never
    /// touched.
    pub fn instantiate(&self, id: &str) -> Result<BuilderNode, TemplateError> {
        let definition = self
            .get(id)
            .ok_or_else(|| TemplateError::TemplateNotFound(id.to_string()))?;
        debug!(template = %id, "instantiating template");
        Ok(clone_node(definition.tree.root(), true))
    }
}
