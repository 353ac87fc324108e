use crate::traverse::{find_node_by_id, parent_of};
use crate::{Id, Node};

pub fn attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref()),
        _ => None,
    }
}

pub fn has_attr(node: &Node, name: &str) -> bool {
    match node {
        Node::Element { attributes, .. } => {
            attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
        }
        _ => false,
    }
}

pub fn collect_text(nodes: &[Node], out: &mut String) {
    for n in nodes {
        match n {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } | Node::Document { children, .. } => {
                collect_text(children, out);
            }
            Node::Comment { .. } => {}
        }
    }
}

/// Trimmed text content of a node's subtree, `None` if empty.
pub fn text_content(node: &Node) -> Option<String> {
    let mut out = String::new();
    collect_text(node.children(), &mut out);
    let trimmed = out.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Find a `<label for="...">` element matching the given `for` value.
pub fn label_for<'a>(root: &'a Node, for_value: &str) -> Option<&'a Node> {
    if root.is_element_named("label")
        && let Some(f) = attr(root, "for")
        && f == for_value
    {
        return Some(root);
    }
    for c in root.children() {
        if let Some(found) = label_for(c, for_value) {
            return Some(found);
        }
    }
    None
}

/// Find a `<label>` ancestor wrapping the node with the given id.
pub fn wrapping_label(root: &Node, target: Id) -> Option<Id> {
    fn walk(node: &Node, target: Id, label: Option<Id>) -> Option<Option<Id>> {
        let label = if node.is_element_named("label") {
            Some(node.id())
        } else {
            label
        };

        if node.id() == target {
            return Some(label);
        }
        for c in node.children() {
            if let Some(found) = walk(c, target, label) {
                return Some(found);
            }
        }
        None
    }

    walk(root, target, None).flatten()
}

/// Text of the label associated with a field: a `<label for>` reference
/// when the field has an `id` attribute, else a wrapping `<label>`.
pub fn label_text_for_field(root: &Node, field: &Node) -> Option<String> {
    if let Some(field_id) = attr(field, "id")
        && let Some(label) = label_for(root, field_id)
    {
        return text_content(label);
    }

    let label_id = wrapping_label(root, field.id())?;
    let label = find_node_by_id(root, label_id)?;
    text_content(label)
}

/// First non-empty heading text inside the subtree, lower heading levels
/// winning over higher ones (an `<h1>` beats any `<h2>`).
pub fn first_heading_text(container: &Node) -> Option<String> {
    for level in 1..=6 {
        let tag = format!("h{level}");
        if let Some(text) = first_heading_of_level(container, &tag) {
            return Some(text);
        }
    }
    None
}

fn first_heading_of_level(node: &Node, tag: &str) -> Option<String> {
    if node.is_element_named(tag)
        && let Some(text) = text_content(node)
    {
        return Some(text);
    }
    for c in node.children() {
        if let Some(found) = first_heading_of_level(c, tag) {
            return Some(found);
        }
    }
    None
}

/// Heading text in the container's parent scope, skipping headings that
/// belong to a different form than the container.
pub fn parent_scope_heading_text(root: &Node, container: Id) -> Option<String> {
    let parent = parent_of(root, container)?;

    for level in 1..=6 {
        let tag = format!("h{level}");
        let mut found = None;
        scan_headings(root, parent, &tag, container, &mut found);
        if found.is_some() {
            return found;
        }
    }
    None
}

fn scan_headings(
    root: &Node,
    node: &Node,
    tag: &str,
    container: Id,
    out: &mut Option<String>,
) {
    if out.is_some() {
        return;
    }
    if node.is_element_named(tag) {
        let owner = crate::traverse::ancestor_form(root, node.id());
        if (owner.is_none() || owner == Some(container))
            && let Some(text) = text_content(node)
        {
            *out = Some(text);
            return;
        }
    }
    for c in node.children() {
        scan_headings(root, c, tag, container, out);
    }
}

/// Trimmed `<title>` text, wherever it sits in the document.
pub fn document_title(root: &Node) -> Option<String> {
    if root.is_element_named("title") {
        return text_content(root);
    }
    for c in root.children() {
        if let Some(found) = document_title(c) {
            return Some(found);
        }
    }
    None
}
