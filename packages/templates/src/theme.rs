//! Theme token transform.
//!
//! Template styles carry semantic color-role tokens written as `var(role)`,
//! e.g. `"background": "var(primary)"`. Applying a site's palette rewrites
//! those references to concrete values, recursing through base styles, every
//! breakpoint override and all children. All other style properties pass
//! through untouched, and the input node (typically the template registry's
//! stored copy, already cloned) is never mutated.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use pagefab_document::BuilderNode;

/// Semantic role to concrete palette value, e.g. `primary -> #3366FF`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemePalette {
    roles: IndexMap<String, String>,
}

impl ThemePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.roles.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.roles.get(name).map(String::as_str)
    }
}

/// Extract the role from a `var(role)` style value.
fn token_role(value: &Value) -> Option<&str> {
    let text = value.as_str()?;
    text.strip_prefix("var(")?.strip_suffix(')').map(str::trim)
}

/// Rewrite every `var(role)` style value to the palette's concrete value.
/// Pure: returns a new node, recursing through all descendants.
pub fn apply_theme(node: &BuilderNode, palette: &ThemePalette) -> BuilderNode {
    let mut themed = node.clone();

    themed.style.base = rewrite_styles(&node.style.base, palette);
    themed.style.breakpoints = node
        .style
        .breakpoints
        .iter()
        .map(|(breakpoint, styles)| (breakpoint.clone(), rewrite_styles(styles, palette)))
        .collect();
    themed.children = node
        .children
        .iter()
        .map(|child| Arc::new(apply_theme(child, palette)))
        .collect();

    themed
}

fn rewrite_styles(
    styles: &IndexMap<String, Value>,
    palette: &ThemePalette,
) -> IndexMap<String, Value> {
    styles
        .iter()
        .map(|(property, value)| {
            if let Some(role) = token_role(value) {
                match palette.get(role) {
                    Some(concrete) => {
                        return (property.clone(), Value::String(concrete.to_string()))
                    }
                    None => {
                        warn!(role, property = %property, "theme palette has no value for token role");
                    }
                }
            }
            (property.clone(), value.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefab_document::{create_node, create_node_with_children};
    use serde_json::json;

    fn palette() -> ThemePalette {
        ThemePalette::new()
            .role("primary", "#3366FF")
            .role("surface", "#FFFFFF")
    }

    fn styled_tree() -> BuilderNode {
        let mut button = create_node("Button", IndexMap::new());
        button
            .style
            .base
            .insert("background".to_string(), json!("var(primary)"));
        button
            .style
            .base
            .insert("padding".to_string(), json!("12px"));
        button.style.breakpoints.insert(
            "mobile".to_string(),
            IndexMap::from([("background".to_string(), json!("var(surface)"))]),
        );

        let mut section = create_node_with_children("Section", IndexMap::new(), vec![button]);
        section
            .style
            .base
            .insert("color".to_string(), json!("var(missing-role)"));
        section
    }

    #[test]
    fn test_tokens_rewritten_recursively() {
        let section = styled_tree();
        let themed = apply_theme(&section, &palette());

        let button = &themed.children[0];
        assert_eq!(button.style.base["background"], json!("#3366FF"));
        assert_eq!(button.style.breakpoints["mobile"]["background"], json!("#FFFFFF"));
    }

    #[test]
    fn test_non_token_properties_untouched() {
        let themed = apply_theme(&styled_tree(), &palette());
        assert_eq!(themed.children[0].style.base["padding"], json!("12px"));
    }

    #[test]
    fn test_unknown_roles_left_as_is() {
        let themed = apply_theme(&styled_tree(), &palette());
        assert_eq!(themed.style.base["color"], json!("var(missing-role)"));
    }

    #[test]
    fn test_input_node_unchanged() {
        let section = styled_tree();
        let before = section.clone();
        apply_theme(&section, &palette());
        assert_eq!(section, before);
    }

    #[test]
    fn test_ids_preserved() {
        let section = styled_tree();
        let themed = apply_theme(&section, &palette());
        assert_eq!(themed.id, section.id);
        assert_eq!(themed.children[0].id, section.children[0].id);
    }
}
