//! # Node Tree Algebra
//!
//! Pure, synchronous operations over [`BuilderNode`] trees.
//!
//! ## Semantics
//!
//! - Every mutating-looking function returns a **new** root; inputs are never
//!   altered. A host editor applies an edit and swaps its root reference.
//! - Only the spine from the root to the edited node is reconstructed; all
//!   sibling subtrees are shared by reference (`Arc`).
//! - Missing targets are errors (`NodeNotFound` / `ParentNotFound`), uniformly
//!   across update, insert, remove and move. There are no silent no-ops.
//! - `move_node` is an atomic detach+insert and rejects any destination inside
//!   the moved subtree (`CycleDetected`).

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::StructuralError;
use crate::id::new_node_id;
use crate::node::{BuilderNode, StyleSheet};

/// Create a node with a fresh id, empty base style, no actions and no
/// children.
///
/// Default-prop merging for registered component types lives in the component
/// registry (`ComponentRegistry::instantiate`); this constructor takes props
/// as given.
pub fn create_node(node_type: impl Into<String>, props: IndexMap<String, Value>) -> BuilderNode {
    create_node_with_children(node_type, props, Vec::new())
}

/// [`create_node`], with an initial child list.
pub fn create_node_with_children(
    node_type: impl Into<String>,
    props: IndexMap<String, Value>,
    children: Vec<BuilderNode>,
) -> BuilderNode {
    BuilderNode {
        id: new_node_id(),
        node_type: node_type.into(),
        props,
        style: StyleSheet::default(),
        actions: Vec::new(),
        meta: IndexMap::new(),
        children: children.into_iter().map(Arc::new).collect(),
    }
}

/// Pre-order search for a node by id.
pub fn find_node_by_id<'a>(root: &'a Arc<BuilderNode>, id: &str) -> Option<&'a Arc<BuilderNode>> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_node_by_id(child, id))
}

/// Pre-order search for the parent of a node. The root has no parent.
pub fn find_parent_node<'a>(root: &'a Arc<BuilderNode>, id: &str) -> Option<&'a Arc<BuilderNode>> {
    if root.children.iter().any(|child| child.id == id) {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_parent_node(child, id))
}

/// Copy a node under a fresh id.
///
/// `deep` clones the whole subtree, assigning a new id to every descendant.
/// A shallow clone carries **no** children: they are neither aliased nor
/// copied over.
pub fn clone_node(node: &BuilderNode, deep: bool) -> BuilderNode {
    let children = if deep {
        node.children
            .iter()
            .map(|child| Arc::new(clone_node(child, true)))
            .collect()
    } else {
        Vec::new()
    };

    BuilderNode {
        id: new_node_id(),
        node_type: node.node_type.clone(),
        props: node.props.clone(),
        style: node.style.clone(),
        actions: node.actions.clone(),
        meta: node.meta.clone(),
        children,
    }
}

/// Replace the node with id `id` by `updater(node)`, rebuilding only the
/// spine from the root down to it.
pub fn update_node_in_tree<F>(
    root: &Arc<BuilderNode>,
    id: &str,
    updater: F,
) -> Result<Arc<BuilderNode>, StructuralError>
where
    F: FnOnce(&BuilderNode) -> BuilderNode,
{
    let mut updater = Some(updater);
    rebuild_spine(root, id, &mut updater)
        .ok_or_else(|| StructuralError::NodeNotFound(id.to_string()))
}

fn rebuild_spine<F>(
    node: &Arc<BuilderNode>,
    id: &str,
    updater: &mut Option<F>,
) -> Option<Arc<BuilderNode>>
where
    F: FnOnce(&BuilderNode) -> BuilderNode,
{
    if node.id == id {
        let updater = updater.take()?;
        return Some(Arc::new(updater(node)));
    }

    for (index, child) in node.children.iter().enumerate() {
        if let Some(new_child) = rebuild_spine(child, id, updater) {
            let mut children = node.children.clone();
            children[index] = new_child;
            return Some(Arc::new(node.with_children(children)));
        }
    }

    None
}

/// Remove the node with id `id` together with its subtree.
///
/// The root itself is never removable through this call.
pub fn remove_node_from_tree(
    root: &Arc<BuilderNode>,
    id: &str,
) -> Result<Arc<BuilderNode>, StructuralError> {
    if root.id == id {
        return Err(StructuralError::RootRemoval);
    }
    detach(root, id)
        .map(|(rebuilt, _removed)| rebuilt)
        .ok_or_else(|| StructuralError::NodeNotFound(id.to_string()))
}

/// Remove a node and return both the rebuilt tree and the removed subtree.
fn detach(node: &Arc<BuilderNode>, id: &str) -> Option<(Arc<BuilderNode>, Arc<BuilderNode>)> {
    if let Some(position) = node.children.iter().position(|child| child.id == id) {
        let mut children = node.children.clone();
        let removed = children.remove(position);
        return Some((Arc::new(node.with_children(children)), removed));
    }

    for (index, child) in node.children.iter().enumerate() {
        if let Some((new_child, removed)) = detach(child, id) {
            let mut children = node.children.clone();
            children[index] = new_child;
            return Some((Arc::new(node.with_children(children)), removed));
        }
    }

    None
}

/// Insert `node` as a child of `parent_id`, clamping `index` into
/// `[0, children.len()]`.
pub fn insert_node_at(
    root: &Arc<BuilderNode>,
    parent_id: &str,
    node: BuilderNode,
    index: usize,
) -> Result<Arc<BuilderNode>, StructuralError> {
    insert_arc_at(root, parent_id, &Arc::new(node), index)
        .ok_or_else(|| StructuralError::ParentNotFound(parent_id.to_string()))
}

fn insert_arc_at(
    node: &Arc<BuilderNode>,
    parent_id: &str,
    child: &Arc<BuilderNode>,
    index: usize,
) -> Option<Arc<BuilderNode>> {
    if node.id == parent_id {
        let mut children = node.children.clone();
        let insert_index = index.min(children.len());
        children.insert(insert_index, child.clone());
        return Some(Arc::new(node.with_children(children)));
    }

    for (position, existing) in node.children.iter().enumerate() {
        if let Some(new_child) = insert_arc_at(existing, parent_id, child, index) {
            let mut children = node.children.clone();
            children[position] = new_child;
            return Some(Arc::new(node.with_children(children)));
        }
    }

    None
}

/// Atomically relocate `node_id` under `new_parent_id` at `index`.
///
/// Moving a node into itself or any of its descendants is rejected with
/// `CycleDetected`. When source and destination parent coincide, the index is
/// interpreted against the child list with the source already removed.
pub fn move_node(
    root: &Arc<BuilderNode>,
    node_id: &str,
    new_parent_id: &str,
    index: usize,
) -> Result<Arc<BuilderNode>, StructuralError> {
    let subtree =
        find_node_by_id(root, node_id).ok_or_else(|| StructuralError::NodeNotFound(node_id.to_string()))?;

    // Destination inside the moved subtree (or the node itself) is a cycle.
    if find_node_by_id(subtree, new_parent_id).is_some() {
        return Err(StructuralError::CycleDetected(node_id.to_string()));
    }

    // The root has no parent to detach from. Every destination that exists
    // lies inside its subtree and was rejected above, so the parent id is
    // the one that is missing.
    if root.id == node_id {
        return Err(StructuralError::ParentNotFound(new_parent_id.to_string()));
    }

    let (stripped, removed) =
        detach(root, node_id).ok_or_else(|| StructuralError::NodeNotFound(node_id.to_string()))?;

    insert_arc_at(&stripped, new_parent_id, &removed, index)
        .ok_or_else(|| StructuralError::ParentNotFound(new_parent_id.to_string()))
}

/// Pre-order traversal of all nodes, root included.
pub fn flatten_tree(root: &Arc<BuilderNode>) -> Vec<&Arc<BuilderNode>> {
    let mut nodes = Vec::new();
    collect_pre_order(root, &mut nodes);
    nodes
}

fn collect_pre_order<'a>(node: &'a Arc<BuilderNode>, out: &mut Vec<&'a Arc<BuilderNode>>) {
    out.push(node);
    for child in &node.children {
        collect_pre_order(child, out);
    }
}

/// Total node count, root included. Always equals `flatten_tree(root).len()`.
pub fn count_nodes(root: &Arc<BuilderNode>) -> usize {
    1 + root.children.iter().map(count_nodes).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// root(section[heading, text, button])
    fn sample_tree() -> Arc<BuilderNode> {
        let heading = create_node("Heading", props(&[("text", json!("Hi"))]));
        let text = create_node("Text", props(&[("text", json!("Body"))]));
        let button = create_node("Button", props(&[("label", json!("Go"))]));
        let section =
            create_node_with_children("Section", IndexMap::new(), vec![heading, text, button]);
        Arc::new(create_node_with_children(
            "Page",
            IndexMap::new(),
            vec![section],
        ))
    }

    fn child_id(root: &Arc<BuilderNode>, node_type: &str) -> String {
        flatten_tree(root)
            .iter()
            .find(|node| node.node_type == node_type)
            .map(|node| node.id.clone())
            .unwrap()
    }

    #[test]
    fn test_create_node_defaults() {
        let node = create_node("Heading", props(&[("text", json!("Hallo Welt")), ("level", json!(1))]));

        assert_eq!(node.props["text"], json!("Hallo Welt"));
        assert!(node.children.is_empty());
        assert!(node.style.base.is_empty());
        assert!(node.actions.is_empty());
        assert!(!node.id.is_empty());
    }

    #[test]
    fn test_find_node_and_parent() {
        let root = sample_tree();
        let heading_id = child_id(&root, "Heading");

        let heading = find_node_by_id(&root, &heading_id).unwrap();
        assert_eq!(heading.node_type, "Heading");

        let parent = find_parent_node(&root, &heading_id).unwrap();
        assert_eq!(parent.node_type, "Section");

        assert!(find_parent_node(&root, &root.id).is_none());
        assert!(find_node_by_id(&root, "missing").is_none());
    }

    #[test]
    fn test_clone_node_shallow_drops_children() {
        let root = sample_tree();
        let section = find_node_by_id(&root, &child_id(&root, "Section")).unwrap();

        let shallow = clone_node(section, false);
        assert_ne!(shallow.id, section.id);
        assert!(shallow.children.is_empty());
        assert_eq!(section.children.len(), 3);
    }

    #[test]
    fn test_clone_node_deep_freshens_every_id() {
        let root = sample_tree();
        let deep = Arc::new(clone_node(&root, true));

        let original_ids: Vec<_> = flatten_tree(&root).iter().map(|n| n.id.clone()).collect();
        for node in flatten_tree(&deep) {
            assert!(!original_ids.contains(&node.id));
        }
        assert_eq!(count_nodes(&deep), count_nodes(&root));
    }

    #[test]
    fn test_update_rebuilds_spine_and_shares_siblings() {
        let root = sample_tree();
        let heading_id = child_id(&root, "Heading");
        let text_id = child_id(&root, "Text");

        let updated = update_node_in_tree(&root, &heading_id, |node| {
            let mut copy = node.clone();
            copy.props.insert("text".to_string(), json!("Changed"));
            copy
        })
        .unwrap();

        let heading = find_node_by_id(&updated, &heading_id).unwrap();
        assert_eq!(heading.props["text"], json!("Changed"));

        // Untouched sibling subtree is the same allocation
        let old_text = find_node_by_id(&root, &text_id).unwrap();
        let new_text = find_node_by_id(&updated, &text_id).unwrap();
        assert!(Arc::ptr_eq(old_text, new_text));
    }

    #[test]
    fn test_update_missing_target_is_an_error() {
        let root = sample_tree();
        let result = update_node_in_tree(&root, "missing", |node| node.clone());
        assert_eq!(result, Err(StructuralError::NodeNotFound("missing".to_string())));
    }

    #[test]
    fn test_remove_root_rejected() {
        let root = sample_tree();
        assert_eq!(
            remove_node_from_tree(&root, &root.id),
            Err(StructuralError::RootRemoval)
        );
    }

    #[test]
    fn test_insert_index_clamped() {
        let root = sample_tree();
        let section_id = child_id(&root, "Section");

        let extra = create_node("Text", props(&[("text", json!("tail"))]));
        let extra_id = extra.id.clone();
        let updated = insert_node_at(&root, &section_id, extra, 99).unwrap();

        let section = find_node_by_id(&updated, &section_id).unwrap();
        assert_eq!(section.children.len(), 4);
        assert_eq!(section.children[3].id, extra_id);
    }

    #[test]
    fn test_insert_missing_parent_is_an_error() {
        let root = sample_tree();
        let node = create_node("Text", IndexMap::new());
        assert_eq!(
            insert_node_at(&root, "missing", node, 0),
            Err(StructuralError::ParentNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_move_reorder_within_same_parent() {
        let root = sample_tree();
        let section_id = child_id(&root, "Section");
        let heading_id = child_id(&root, "Heading");

        // [heading, text, button] -> remove heading -> [text, button],
        // index 1 lands heading between text and button.
        let updated = move_node(&root, &heading_id, &section_id, 1).unwrap();
        let section = find_node_by_id(&updated, &section_id).unwrap();
        let order: Vec<_> = section.children.iter().map(|c| c.node_type.as_str()).collect();
        assert_eq!(order, vec!["Text", "Heading", "Button"]);
    }

    #[test]
    fn test_move_into_own_descendant_rejected() {
        let root = sample_tree();
        let section_id = child_id(&root, "Section");
        let heading_id = child_id(&root, "Heading");

        assert_eq!(
            move_node(&root, &section_id, &heading_id, 0),
            Err(StructuralError::CycleDetected(section_id.clone()))
        );
        assert_eq!(
            move_node(&root, &section_id, &section_id, 0),
            Err(StructuralError::CycleDetected(section_id))
        );
    }

    #[test]
    fn test_move_root_names_the_missing_parent() {
        let root = sample_tree();

        assert_eq!(
            move_node(&root, &root.id, "missing", 0),
            Err(StructuralError::ParentNotFound("missing".to_string()))
        );

        // Moving the root under one of its own descendants stays a cycle
        let section_id = child_id(&root, "Section");
        assert_eq!(
            move_node(&root, &root.id, &section_id, 0),
            Err(StructuralError::CycleDetected(root.id.clone()))
        );
    }

    #[test]
    fn test_flatten_pre_order() {
        let root = sample_tree();
        let types: Vec<_> = flatten_tree(&root)
            .iter()
            .map(|node| node.node_type.as_str())
            .collect();
        assert_eq!(types, vec!["Page", "Section", "Heading", "Text", "Button"]);
        assert_eq!(count_nodes(&root), flatten_tree(&root).len());
    }
}
