//! # Undo/Redo History
//!
//! Snapshot-based history over persistent trees.
//!
//! ## Design
//!
//! - Before an edit applies, the current tree is pushed as a snapshot
//! - Undo restores the snapshot and moves the replaced tree to the redo stack
//! - Redo restores the other way
//! - A new edit clears the redo stack
//!
//! Snapshots are whole [`BuilderTree`] values. Structural sharing makes them
//! cheap: each one holds `Arc`s into the subtrees it shares with its
//! neighbors, so memory cost is proportional to what actually changed.

use std::sync::Arc;

use pagefab_document::{BuilderNode, BuilderTree, StructuralError};

use crate::document::EditorDocument;

/// Undo/redo stack for one editing session.
#[derive(Debug, Default)]
pub struct History {
    /// Snapshots taken before each applied edit (most recent last).
    undo_stack: Vec<BuilderTree>,

    /// Snapshots replaced by undo (most recent last).
    redo_stack: Vec<BuilderTree>,

    /// Maximum undo levels (0 = unlimited).
    max_levels: usize,
}

impl History {
    /// History with the default limit of 100 levels.
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply an edit through the document, recording the pre-edit tree.
    ///
    /// A failed edit records nothing.
    pub fn apply<F>(&mut self, doc: &mut EditorDocument, edit: F) -> Result<(), StructuralError>
    where
        F: FnOnce(&Arc<BuilderNode>) -> Result<Arc<BuilderNode>, StructuralError>,
    {
        let snapshot = doc.tree().clone();
        doc.apply(edit)?;

        self.undo_stack.push(snapshot);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        Ok(())
    }

    /// Restore the most recent snapshot. Returns `false` with nothing to undo.
    pub fn undo(&mut self, doc: &mut EditorDocument) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.redo_stack.push(doc.tree().clone());
                doc.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone tree. Returns `false` with nothing to
    /// redo.
    pub fn redo(&mut self, doc: &mut EditorDocument) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push(doc.tree().clone());
                doc.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
