//! Collection registry: named field-typed schemas for CMS data.
//!
//! Collections describe the shape of externally stored records; node props
//! reference their fields through [`DataBinding`](crate::DataBinding)s.
//! Record storage and binding resolution are external.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RegistryError, SchemaError};
use crate::schema::{FieldKind, FieldSpec, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFieldDefinition {
    pub field_type: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    #[serde(default)]
    pub fields: IndexMap<String, CollectionFieldDefinition>,
}

impl CollectionSchema {
    /// View of this collection schema as a value schema, for record checks.
    fn as_schema(&self) -> Schema {
        let mut schema = Schema::new();
        for (name, field) in &self.fields {
            let spec = if field.required {
                FieldSpec::required(field.field_type)
            } else {
                FieldSpec::new(field.field_type)
            };
            schema = schema.field(name.clone(), spec.with_label(field.label.clone()));
        }
        schema
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    pub id: String,
    pub name: String,
    pub schema: CollectionSchema,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    definitions: IndexMap<String, CollectionDefinition>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: CollectionDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(&definition.id) {
            return Err(RegistryError::Duplicate {
                kind: "collection",
                key: definition.id,
            });
        }
        debug!(collection = %definition.id, "registered collection");
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&CollectionDefinition> {
        self.definitions.get(id)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &CollectionDefinition> {
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

    /// Validate one CMS record against a registered collection's fields.
    pub fn validate_record(&self, collection_id: &str, record: &Value) -> Result<(), RegistryError> {
        let definition = self.get(collection_id).ok_or(RegistryError::Unknown {
            kind: "collection",
            key: collection_id.to_string(),
        })?;
        definition
            .schema
            .as_schema()
            .validate_value(record)
            .map_err(|error: SchemaError| RegistryError::Invalid {
                kind: "collection",
                key: collection_id.to_string(),
                error,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts() -> CollectionDefinition {
        CollectionDefinition {
            id: "posts".to_string(),
            name: "Blog posts".to_string(),
            schema: CollectionSchema {
                fields: IndexMap::from([
                    (
                        "title".to_string(),
                        CollectionFieldDefinition {
                            field_type: FieldKind::String,
                            label: "Title".to_string(),
                            required: true,
                        },
                    ),
                    (
                        "published".to_string(),
                        CollectionFieldDefinition {
                            field_type: FieldKind::Boolean,
                            label: "Published".to_string(),
                            required: false,
                        },
                    ),
                ]),
            },
        }
    }

    #[test]
    fn test_record_validation() {
        let mut registry = CollectionRegistry::new();
        registry.register(posts()).unwrap();

        assert!(registry
            .validate_record("posts", &json!({ "title": "Hello", "published": true }))
            .is_ok());

        let err = registry
            .validate_record("posts", &json!({ "published": "yes" }))
            .unwrap_err();
        match err {
            RegistryError::Invalid { error, .. } => assert_eq!(error.violations.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_collection_rejected() {
        let registry = CollectionRegistry::new();
        let err = registry.validate_record("missing", &json!({})).unwrap_err();
        assert!(matches!(err, RegistryError::Unknown { .. }));
    }
}
