//! Minimal DOM tree model for form tooling.
//!
//! This crate carries the structural side of a page: a [`Node`] tree with
//! stable [`Id`]s, traversal helpers, and the attribute/label/heading
//! lookups the snapshot and fill layers need. It knows nothing about
//! field state or snapshots.

mod traverse;
mod types;
mod utils;

pub use traverse::{ancestor_form, assign_node_ids, find_node_by_id, for_each_element, parent_of};
pub use types::{Id, Node, NodeId};
pub use utils::{
    attr, collect_text, document_title, first_heading_text, has_attr, label_for,
    label_text_for_field, parent_scope_heading_text, text_content, wrapping_label,
};
