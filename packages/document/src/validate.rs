//! Tree validation.
//!
//! Two entry points over the same checks:
//!
//! - [`is_valid_builder_tree`] is boolean and never errors. Quick UI gating
//!   (e.g. enabling a publish button). Does not compare `builderVersion`.
//! - [`validate_builder_tree`] is strict. It collects **every** violation
//!   (field path + message), flags a `builderVersion` other than
//!   [`CURRENT_BUILDER_VERSION`], and on success returns the parsed
//!   [`BuilderTree`]. Run before persistence and after template commit.
//!
//! The leaf rule (`canHaveChildren = false` components must not carry
//! children) is resolved through [`NodeTypeLookup`] so the algebra stays free
//! of any registry dependency. Unresolved types are not checked.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{TreeValidationError, Violation, ViolationKind};
use crate::node::{BuilderTree, CURRENT_BUILDER_VERSION};

/// Resolution seam between the tree and the component registry.
///
/// `None` means the type is unknown to the lookup; such nodes are treated as
/// opaque and skipped by the leaf rule.
pub trait NodeTypeLookup {
    fn can_have_children(&self, node_type: &str) -> Option<bool>;
}

/// Lookup that resolves nothing. Every type stays opaque.
impl NodeTypeLookup for () {
    fn can_have_children(&self, _node_type: &str) -> Option<bool> {
        None
    }
}

/// Boolean structural check. See the module docs for what it covers.
pub fn is_valid_builder_tree(candidate: &Value, types: &dyn NodeTypeLookup) -> bool {
    collect_violations(candidate, types, false).is_empty()
}

/// Strict validation: parse, check, and enumerate every violation.
pub fn validate_builder_tree(
    candidate: &Value,
    types: &dyn NodeTypeLookup,
) -> Result<BuilderTree, TreeValidationError> {
    let mut violations = collect_violations(candidate, types, true);

    if violations.is_empty() {
        match serde_json::from_value::<BuilderTree>(candidate.clone()) {
            Ok(tree) => return Ok(tree),
            Err(err) => violations.push(Violation {
                path: String::new(),
                kind: ViolationKind::WrongType,
                message: format!("document does not parse: {err}"),
            }),
        }
    }

    Err(TreeValidationError { violations })
}

fn collect_violations(
    candidate: &Value,
    types: &dyn NodeTypeLookup,
    check_version: bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let Some(object) = candidate.as_object() else {
        violations.push(Violation {
            path: String::new(),
            kind: ViolationKind::WrongType,
            message: "tree must be a JSON object".to_string(),
        });
        return violations;
    };

    match object.get("builderVersion").and_then(Value::as_u64) {
        None => violations.push(Violation {
            path: "builderVersion".to_string(),
            kind: ViolationKind::MissingField,
            message: "missing or non-integer builderVersion".to_string(),
        }),
        Some(version) if check_version && version != u64::from(CURRENT_BUILDER_VERSION) => {
            violations.push(Violation {
                path: "builderVersion".to_string(),
                kind: ViolationKind::VersionMismatch,
                message: format!(
                    "builderVersion {version} does not match current version {CURRENT_BUILDER_VERSION}"
                ),
            });
        }
        Some(_) => {}
    }

    match object.get("root") {
        None => violations.push(Violation {
            path: "root".to_string(),
            kind: ViolationKind::MissingField,
            message: "missing root node".to_string(),
        }),
        Some(root) => {
            let mut seen_ids = HashSet::new();
            check_node(root, "root", types, &mut seen_ids, &mut violations);
        }
    }

    violations
}

fn check_node(
    node: &Value,
    path: &str,
    types: &dyn NodeTypeLookup,
    seen_ids: &mut HashSet<String>,
    violations: &mut Vec<Violation>,
) {
    let Some(object) = node.as_object() else {
        violations.push(Violation {
            path: path.to_string(),
            kind: ViolationKind::WrongType,
            message: "node must be a JSON object".to_string(),
        });
        return;
    };

    match object.get("id").and_then(Value::as_str) {
        None => violations.push(Violation {
            path: format!("{path}.id"),
            kind: ViolationKind::MissingField,
            message: "missing id".to_string(),
        }),
        Some("") => violations.push(Violation {
            path: format!("{path}.id"),
            kind: ViolationKind::EmptyId,
            message: "id must be non-empty".to_string(),
        }),
        Some(id) => {
            if !seen_ids.insert(id.to_string()) {
                violations.push(Violation {
                    path: format!("{path}.id"),
                    kind: ViolationKind::DuplicateId,
                    message: format!("id '{id}' appears more than once"),
                });
            }
        }
    }

    let node_type = object.get("type").and_then(Value::as_str);
    if node_type.is_none() {
        violations.push(Violation {
            path: format!("{path}.type"),
            kind: ViolationKind::MissingField,
            message: "missing type".to_string(),
        });
    }

    let children = object.get("children").and_then(Value::as_array);

    if let (Some(node_type), Some(children)) = (node_type, children) {
        if types.can_have_children(node_type) == Some(false) && !children.is_empty() {
            violations.push(Violation {
                path: format!("{path}.children"),
                kind: ViolationKind::LeafWithChildren,
                message: format!("component '{node_type}' cannot have children"),
            });
        }
    }

    if let Some(children) = children {
        for (index, child) in children.iter().enumerate() {
            check_node(
                child,
                &format!("{path}.children[{index}]"),
                types,
                seen_ids,
                violations,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct LeafText;

    impl NodeTypeLookup for LeafText {
        fn can_have_children(&self, node_type: &str) -> Option<bool> {
            match node_type {
                "Text" => Some(false),
                "Section" => Some(true),
                _ => None,
            }
        }
    }

    fn node(id: &str, node_type: &str, children: Value) -> Value {
        json!({ "id": id, "type": node_type, "props": {}, "children": children })
    }

    #[test]
    fn test_missing_root_is_invalid() {
        assert!(!is_valid_builder_tree(&json!({ "builderVersion": 1 }), &()));
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let tree = json!({
            "builderVersion": 1,
            "root": node("root", "Section", json!([node("", "Text", json!([]))])),
        });
        assert!(!is_valid_builder_tree(&tree, &()));
    }

    #[test]
    fn test_duplicate_id_reported_with_path() {
        let tree = json!({
            "builderVersion": 1,
            "root": node(
                "root",
                "Section",
                json!([node("dup", "Text", json!([])), node("dup", "Text", json!([]))]),
            ),
        });

        let err = validate_builder_tree(&tree, &()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, ViolationKind::DuplicateId);
        assert_eq!(err.violations[0].path, "root.children[1].id");
    }

    #[test]
    fn test_leaf_rule_uses_lookup_and_skips_unresolved() {
        let tree = json!({
            "builderVersion": 1,
            "root": node(
                "root",
                "Section",
                json!([
                    node("a", "Text", json!([node("b", "Text", json!([]))])),
                    node("c", "Mystery", json!([node("d", "Text", json!([]))])),
                ]),
            ),
        });

        // Unresolved "Mystery" is not checked; the Text leaf is.
        let err = validate_builder_tree(&tree, &LeafText).unwrap_err();
        let kinds: Vec<_> = err.violations.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![ViolationKind::LeafWithChildren]);

        assert!(is_valid_builder_tree(&tree, &()));
    }

    #[test]
    fn test_version_mismatch_only_in_strict_mode() {
        let tree = json!({
            "builderVersion": 999,
            "root": node("root", "Section", json!([])),
        });

        assert!(is_valid_builder_tree(&tree, &()));

        let err = validate_builder_tree(&tree, &()).unwrap_err();
        assert_eq!(err.violations[0].kind, ViolationKind::VersionMismatch);
    }

    #[test]
    fn test_strict_validation_returns_parsed_tree() {
        let tree = json!({
            "builderVersion": CURRENT_BUILDER_VERSION,
            "root": node("root", "Section", json!([node("a", "Text", json!([]))])),
        });

        let parsed = validate_builder_tree(&tree, &()).unwrap();
        assert_eq!(parsed.builder_version, CURRENT_BUILDER_VERSION);
        assert_eq!(parsed.root.children[0].id, "a");
    }
}
