//! Runtime schemas for props, action parameters and collection records.
//!
//! Props stay loosely typed on the node; a schema supplies the shape check at
//! the acceptance boundary. Keys not named by the schema are allowed, so a
//! plugin can attach private props without the host's schema knowing them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::DataBinding;
use crate::error::{SchemaError, SchemaViolation};

/// Value kinds a field can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Color,
    Object,
    List,
    /// Accepts either any literal or a [`DataBinding`] envelope.
    Binding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            label: None,
        }
    }

    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Named, field-typed schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Validate a prop map. Aggregates every violation instead of failing
    /// fast.
    pub fn validate(&self, props: &IndexMap<String, Value>) -> Result<(), SchemaError> {
        self.validate_with(|name| props.get(name))
    }

    /// Validate a JSON object value (action payloads, collection records).
    pub fn validate_value(&self, value: &Value) -> Result<(), SchemaError> {
        let Some(object) = value.as_object() else {
            return Err(SchemaError {
                violations: vec![SchemaViolation {
                    path: String::new(),
                    message: "expected a JSON object".to_string(),
                }],
            });
        };
        self.validate_with(|name| object.get(name))
    }

    fn validate_with<'a>(
        &self,
        get: impl Fn(&str) -> Option<&'a Value>,
    ) -> Result<(), SchemaError> {
        let mut violations = Vec::new();

        for (name, spec) in &self.fields {
            match get(name) {
                None => {
                    if spec.required {
                        violations.push(SchemaViolation {
                            path: name.clone(),
                            message: "required field is missing".to_string(),
                        });
                    }
                }
                Some(value) => {
                    if let Some(message) = check_field(spec.kind, value) {
                        violations.push(SchemaViolation {
                            path: name.clone(),
                            message,
                        });
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { violations })
        }
    }
}

/// Kind check for one field value. A [`DataBinding`] envelope satisfies any
/// kind: the bound value's own type is only known at resolution time.
fn check_field(kind: FieldKind, value: &Value) -> Option<String> {
    if DataBinding::is_binding(value) {
        return None;
    }

    let ok = match kind {
        FieldKind::String | FieldKind::Color => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::Object => value.is_object(),
        FieldKind::List => value.is_array(),
        FieldKind::Binding => true,
    };

    if ok {
        None
    } else {
        Some(format!("expected {kind:?}, got {}", kind_of(value)))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heading_schema() -> Schema {
        Schema::new()
            .field("text", FieldSpec::required(FieldKind::String))
            .field("level", FieldSpec::new(FieldKind::Number))
    }

    #[test]
    fn test_valid_props_pass() {
        let props = IndexMap::from([
            ("text".to_string(), json!("Hello")),
            ("level".to_string(), json!(2)),
        ]);
        assert!(heading_schema().validate(&props).is_ok());
    }

    #[test]
    fn test_all_violations_are_collected() {
        let props = IndexMap::from([("level".to_string(), json!("two"))]);

        let err = heading_schema().validate(&props).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].path, "text");
        assert_eq!(err.violations[1].path, "level");
    }

    #[test]
    fn test_unknown_keys_are_allowed() {
        let props = IndexMap::from([
            ("text".to_string(), json!("Hello")),
            ("pluginInternal".to_string(), json!({ "anything": true })),
        ]);
        assert!(heading_schema().validate(&props).is_ok());
    }

    #[test]
    fn test_binding_satisfies_any_kind() {
        let props = IndexMap::from([(
            "text".to_string(),
            DataBinding::new("posts", "title").to_value(),
        )]);
        assert!(heading_schema().validate(&props).is_ok());
    }

    #[test]
    fn test_validate_value_requires_object() {
        let err = heading_schema().validate_value(&json!("nope")).unwrap_err();
        assert_eq!(err.violations[0].message, "expected a JSON object");
    }
}
