//! Node id generation.
//!
//! Ids are random v4 UUIDs rendered as strings. Collision probability is
//! negligible across practical tree sizes, and independently generated ids
//! (e.g. two instantiations of the same template) are disjoint without any
//! shared counter state.

use uuid::Uuid;

/// Generate a fresh node id.
pub fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}
