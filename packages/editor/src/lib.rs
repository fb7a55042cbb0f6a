//! # Pagefab Editor
//!
//! Host-side editing conveniences over the pure document core.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorDocument + History            │
//! │  - hold the current BuilderTree             │
//! │  - apply one algebra edit, swap the root    │
//! │  - snapshot undo/redo                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: pure node tree algebra            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering, persistence and multi-user sessions stay outside; this crate
//! only owns the "current tree + history" state every host needs.

mod document;
mod history;

pub use document::EditorDocument;
pub use history::History;
