//! Action registry: tagged action payloads and their parameter schemas.
//!
//! An [`ActionBinding`] on a node carries `{ event, action: { type, ...params } }`.
//! The `type` string is the tag; the registered [`ActionDefinition`] supplies
//! the parameter schema. This registry is the only place action shape is
//! enforced; the tree algebra treats `actions` opaquely.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pagefab_document::ActionBinding;

use crate::error::{RegistryError, SchemaError, SchemaViolation};
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    pub action_type: String,
    #[serde(default)]
    pub params_schema: Schema,
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    definitions: IndexMap<String, ActionDefinition>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ActionDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(&definition.action_type) {
            return Err(RegistryError::Duplicate {
                kind: "action",
                key: definition.action_type,
            });
        }
        debug!(action = %definition.action_type, "registered action");
        self.definitions
            .insert(definition.action_type.clone(), definition);
        Ok(())
    }

    pub fn get(&self, action_type: &str) -> Option<&ActionDefinition> {
        self.definitions.get(action_type)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.definitions.values()
    }

    pub fn contains(&self, action_type: &str) -> bool {
        self.definitions.contains_key(action_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Validate a binding before it is accepted into a node's `actions` list.
    ///
    /// The payload must be an object tagged with a registered `type`; its
    /// type-specific parameters (inline next to the tag) are checked against
    /// the matching `params_schema`.
    pub fn validate_binding(&self, binding: &ActionBinding) -> Result<(), SchemaError> {
        let action = &binding.action;

        let Some(action_type) = action.get("type").and_then(Value::as_str) else {
            return Err(SchemaError {
                violations: vec![SchemaViolation {
                    path: "action.type".to_string(),
                    message: "action payload must carry a string 'type' tag".to_string(),
                }],
            });
        };

        let Some(definition) = self.get(action_type) else {
            return Err(SchemaError {
                violations: vec![SchemaViolation {
                    path: "action.type".to_string(),
                    message: format!("unknown action type '{action_type}'"),
                }],
            });
        };

        definition.params_schema.validate_value(action)
    }
}
