//! Component registry: `type` string to component definition.
//!
//! Populated once during plugin loading and read-mostly afterward. UI
//! palettes iterate [`ComponentRegistry::get_all`]; prop editors read
//! `props_schema`; the tree validator resolves the leaf rule through the
//! [`NodeTypeLookup`] impl.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pagefab_document::{create_node, BuilderNode, NodeTypeLookup};

use crate::error::{RegistryError, SchemaError};
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(rename = "type")]
    pub component_type: String,
    pub display_name: String,
    /// Palette grouping, e.g. "layout" or "content".
    pub category: String,
    pub can_have_children: bool,
    #[serde(default)]
    pub props_schema: Schema,
    #[serde(default)]
    pub default_props: IndexMap<String, Value>,
}

/// A component whose `default_props` do not satisfy its own `props_schema`.
///
/// The contract is that defaults validate; a small number of declared
/// exceptions is tolerated and guarded by a regression test.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultPropsFailure {
    pub component_type: String,
    pub error: SchemaError,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    definitions: IndexMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Duplicate types are rejected; re-registering is
    /// never silent.
    pub fn register(&mut self, definition: ComponentDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(&definition.component_type) {
            return Err(RegistryError::Duplicate {
                kind: "component",
                key: definition.component_type,
            });
        }
        debug!(component = %definition.component_type, "registered component");
        self.definitions
            .insert(definition.component_type.clone(), definition);
        Ok(())
    }

    pub fn get(&self, component_type: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(component_type)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.definitions.contains_key(component_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Create a node of `component_type`, merging `props` over the
    /// registered `default_props`. Unregistered types get the props as given
    /// (reads stay tolerant of disabled plugins).
    pub fn instantiate(
        &self,
        component_type: &str,
        props: IndexMap<String, Value>,
    ) -> BuilderNode {
        let merged = match self.get(component_type) {
            Some(definition) => {
                let mut merged = definition.default_props.clone();
                merged.extend(props);
                merged
            }
            None => props,
        };
        create_node(component_type, merged)
    }

    /// Validate a prop map against the registered schema for `component_type`.
    pub fn validate_props(
        &self,
        component_type: &str,
        props: &IndexMap<String, Value>,
    ) -> Result<(), RegistryError> {
        let definition = self.get(component_type).ok_or(RegistryError::Unknown {
            kind: "component",
            key: component_type.to_string(),
        })?;
        definition
            .props_schema
            .validate(props)
            .map_err(|error| RegistryError::Invalid {
                kind: "component",
                key: component_type.to_string(),
                error,
            })
    }

    /// Check the defaults-validate contract for every registered component.
    pub fn check_default_props(&self) -> Vec<DefaultPropsFailure> {
        self.definitions
            .values()
            .filter_map(|definition| {
                definition
                    .props_schema
                    .validate(&definition.default_props)
                    .err()
                    .map(|error| DefaultPropsFailure {
                        component_type: definition.component_type.clone(),
                        error,
                    })
            })
            .collect()
    }
}

impl NodeTypeLookup for ComponentRegistry {
    fn can_have_children(&self, node_type: &str) -> Option<bool> {
        self.get(node_type)
            .map(|definition| definition.can_have_children)
    }
}
