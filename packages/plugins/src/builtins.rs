//! The standard bundle: the stock components and actions every site starts
//! with. Hosts load it like any other plugin, so disabling or replacing it is
//! the same host-level decision as for third-party bundles.

use indexmap::IndexMap;
use serde_json::json;

use pagefab_registry::{
    ActionDefinition, ComponentDefinition, FieldKind, FieldSpec, Schema,
};

use crate::PluginDefinition;

fn component(
    component_type: &str,
    display_name: &str,
    category: &str,
    can_have_children: bool,
    props_schema: Schema,
    default_props: IndexMap<String, serde_json::Value>,
) -> ComponentDefinition {
    ComponentDefinition {
        component_type: component_type.to_string(),
        display_name: display_name.to_string(),
        category: category.to_string(),
        can_have_children,
        props_schema,
        default_props,
    }
}

/// The built-in component and action set.
pub fn standard_plugin() -> PluginDefinition {
    PluginDefinition {
        name: "standard".to_string(),
        components: vec![
            component(
                "Page",
                "Page",
                "layout",
                true,
                Schema::new().field("title", FieldSpec::new(FieldKind::String)),
                IndexMap::new(),
            ),
            component(
                "Section",
                "Section",
                "layout",
                true,
                Schema::new().field("fullWidth", FieldSpec::new(FieldKind::Boolean)),
                IndexMap::from([("fullWidth".to_string(), json!(false))]),
            ),
            component(
                "Heading",
                "Heading",
                "content",
                false,
                Schema::new()
                    .field("text", FieldSpec::required(FieldKind::String))
                    .field("level", FieldSpec::new(FieldKind::Number)),
                IndexMap::from([
                    ("text".to_string(), json!("Heading")),
                    ("level".to_string(), json!(1)),
                ]),
            ),
            component(
                "Text",
                "Text",
                "content",
                false,
                Schema::new().field("text", FieldSpec::required(FieldKind::Binding)),
                IndexMap::from([("text".to_string(), json!("Lorem ipsum"))]),
            ),
            component(
                "Button",
                "Button",
                "content",
                false,
                Schema::new()
                    .field("label", FieldSpec::required(FieldKind::String))
                    .field("variant", FieldSpec::new(FieldKind::String)),
                IndexMap::from([
                    ("label".to_string(), json!("Click me")),
                    ("variant".to_string(), json!("primary")),
                ]),
            ),
            component(
                "Image",
                "Image",
                "media",
                false,
                Schema::new()
                    .field("src", FieldSpec::required(FieldKind::String))
                    .field("alt", FieldSpec::new(FieldKind::String)),
                IndexMap::from([
                    ("src".to_string(), json!("/placeholder.png")),
                    ("alt".to_string(), json!("")),
                ]),
            ),
        ],
        actions: vec![
            ActionDefinition {
                action_type: "navigate".to_string(),
                params_schema: Schema::new()
                    .field("to", FieldSpec::required(FieldKind::String))
                    .field("replace", FieldSpec::new(FieldKind::Boolean)),
            },
            ActionDefinition {
                action_type: "open-url".to_string(),
                params_schema: Schema::new()
                    .field("url", FieldSpec::required(FieldKind::String))
                    .field("newTab", FieldSpec::new(FieldKind::Boolean)),
            },
            ActionDefinition {
                action_type: "scroll-to".to_string(),
                params_schema: Schema::new()
                    .field("target", FieldSpec::required(FieldKind::String)),
            },
            ActionDefinition {
                action_type: "submit-form".to_string(),
                params_schema: Schema::new(),
            },
        ],
        collections: vec![],
    }
}
