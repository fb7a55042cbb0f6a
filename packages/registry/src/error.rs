//! Error types for the registries.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate {kind} definition: {key}")]
    Duplicate { kind: &'static str, key: String },

    #[error("Unknown {kind}: {key}")]
    Unknown { kind: &'static str, key: String },

    #[error("Invalid {kind} '{key}': {error}")]
    Invalid {
        kind: &'static str,
        key: String,
        #[source]
        error: SchemaError,
    },
}

/// One schema violation: where, and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

/// Aggregate schema validation failure.
///
/// Validation never stops at the first problem; every violation is collected
/// so a prop editor can surface all of them at once.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("schema validation failed ({} violation{})", violations.len(), if violations.len() == 1 { "" } else { "s" })]
pub struct SchemaError {
    pub violations: Vec<SchemaViolation>,
}
