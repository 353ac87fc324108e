//! Automatic preset names.
//!
//! A freshly captured preset gets its name from the page, in order of
//! preference: a heading inside the captured container, a heading in the
//! container's parent scope (skipping headings owned by other forms),
//! the document title, and finally a timestamped placeholder.

use fill_core::epoch_millis;
use formdom::{
    Id, Node, document_title, find_node_by_id, first_heading_text, parent_scope_heading_text,
};

pub fn suggest_preset_name(dom: &Node, container: Id) -> String {
    if let Some(node) = find_node_by_id(dom, container)
        && let Some(heading) = first_heading_text(node)
    {
        return heading;
    }
    if let Some(heading) = parent_scope_heading_text(dom, container) {
        return heading;
    }
    if let Some(title) = document_title(dom) {
        return title;
    }
    format!("Preset {}", epoch_millis())
}
