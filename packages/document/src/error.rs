//! Error types for the document core.

use serde::Serialize;
use thiserror::Error;

/// Structural edit failures.
///
/// All structural edit functions use one policy for a missing target: they
/// return an error. None of them silently no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Moving '{0}' here would make its subtree contain itself")]
    CycleDetected(String),

    #[error("The root node cannot be removed")]
    RootRemoval,
}

/// One violation found by the strict tree validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path into the JSON document, e.g. `root.children[1].id`.
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    MissingField,
    WrongType,
    EmptyId,
    DuplicateId,
    LeafWithChildren,
    VersionMismatch,
}

/// Aggregate result of [`validate_builder_tree`](crate::validate_builder_tree).
///
/// Every violation in the document is collected before this is returned, so a
/// UI can show all problems at once instead of the first one found.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid builder tree ({} violation{})", violations.len(), if violations.len() == 1 { "" } else { "s" })]
pub struct TreeValidationError {
    pub violations: Vec<Violation>,
}

impl TreeValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}
