//! # Document Handle
//!
//! The host-side wrapper around one editable [`BuilderTree`].
//!
//! Each edit is one pure algebra call; on success the handle swaps its root
//! reference and bumps a version counter. Because edits never alias mutable
//! state, any number of handles and history snapshots can coexist without
//! coordination.

use std::sync::Arc;

use pagefab_document::{BuilderNode, BuilderTree, StructuralError};

/// One editing session's view of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorDocument {
    tree: BuilderTree,

    /// Increments on each applied edit.
    version: u64,
}

impl EditorDocument {
    pub fn new(tree: BuilderTree) -> Self {
        Self { tree, version: 0 }
    }

    /// Wrap a bare root node at the current builder version.
    pub fn from_root(root: BuilderNode) -> Self {
        Self::new(BuilderTree::new(root))
    }

    pub fn tree(&self) -> &BuilderTree {
        &self.tree
    }

    pub fn root(&self) -> &Arc<BuilderNode> {
        &self.tree.root
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Run one algebra edit against the current root and swap on success.
    ///
    /// A failed edit leaves the document untouched, version included.
    pub fn apply<F>(&mut self, edit: F) -> Result<(), StructuralError>
    where
        F: FnOnce(&Arc<BuilderNode>) -> Result<Arc<BuilderNode>, StructuralError>,
    {
        let new_root = edit(&self.tree.root)?;
        self.tree.root = new_root;
        self.version += 1;
        Ok(())
    }

    /// Replace the whole tree (undo/redo restore). Counts as an edit.
    pub fn restore(&mut self, tree: BuilderTree) {
        self.tree = tree;
        self.version += 1;
    }
}
