//! Data bindings.
//!
//! A prop value may reference a collection field instead of holding a
//! literal. The serialized envelope is:
//!
//! ```json
//! { "$bind": { "collection": "posts", "field": "title" } }
//! ```
//!
//! Resolution of a binding against actual records is the rendering layer's
//! job; this module only defines the shape and recognizes it in value
//! position.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Envelope key marking a bound (non-literal) prop value.
pub const BINDING_KEY: &str = "$bind";

/// Reference to a field of a registered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBinding {
    pub collection: String,
    pub field: String,
}

impl DataBinding {
    pub fn new(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
        }
    }

    /// Parse a prop value as a binding, if it carries the envelope.
    pub fn from_value(value: &Value) -> Option<DataBinding> {
        let envelope = value.get(BINDING_KEY)?;
        serde_json::from_value(envelope.clone()).ok()
    }

    /// `true` when the value is a binding rather than a literal.
    pub fn is_binding(value: &Value) -> bool {
        Self::from_value(value).is_some()
    }

    pub fn to_value(&self) -> Value {
        json!({ BINDING_KEY: { "collection": self.collection, "field": self.field } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_round_trip() {
        let binding = DataBinding::new("posts", "title");
        let value = binding.to_value();

        assert!(DataBinding::is_binding(&value));
        assert_eq!(DataBinding::from_value(&value), Some(binding));
    }

    #[test]
    fn test_literals_are_not_bindings() {
        assert!(!DataBinding::is_binding(&json!("hello")));
        assert!(!DataBinding::is_binding(&json!({ "collection": "posts" })));
        assert!(!DataBinding::is_binding(&json!({ "$bind": "malformed" })));
    }
}
