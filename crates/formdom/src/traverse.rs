use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        let needs_id = node.id() == Id(0);

        if needs_id {
            let id = Id(*next);
            *next = next.wrapping_add(1);
            node.set_id(id);
        }

        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = highest_id(root).wrapping_add(1).max(1);
    walk(root, &mut next);
}

fn highest_id(node: &Node) -> u32 {
    let mut max = node.id().0;
    for c in node.children() {
        max = max.max(highest_id(c));
    }
    max
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children() {
        if let Some(found) = find_node_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

/// Parent element/document of the node with the given id.
pub fn parent_of(root: &Node, id: Id) -> Option<&Node> {
    for c in root.children() {
        if c.id() == id {
            return Some(root);
        }
        if let Some(found) = parent_of(c, id) {
            return Some(found);
        }
    }
    None
}

/// Nearest enclosing `<form>` element for the node with the given id,
/// the node itself included.
pub fn ancestor_form(root: &Node, id: Id) -> Option<Id> {
    fn walk(node: &Node, id: Id, current_form: Option<Id>) -> Option<Option<Id>> {
        let current_form = if node.is_element_named("form") {
            Some(node.id())
        } else {
            current_form
        };

        if node.id() == id {
            return Some(current_form);
        }
        for c in node.children() {
            if let Some(found) = walk(c, id, current_form) {
                return Some(found);
            }
        }
        None
    }

    walk(root, id, None).flatten()
}

/// Visit every element node in document order.
pub fn for_each_element<'a>(node: &'a Node, f: &mut impl FnMut(&'a Node)) {
    if matches!(node, Node::Element { .. }) {
        f(node);
    }
    for c in node.children() {
        for_each_element(c, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elem(id: u32, name: &str, children: Vec<Node>) -> Node {
        Node::Element {
            id: Id(id),
            name: name.to_string(),
            attributes: Vec::new(),
            children,
        }
    }

    fn doc(children: Vec<Node>) -> Node {
        Node::Document {
            id: Id(0),
            children,
        }
    }

    #[test]
    fn assign_ids_fills_unset_nodes_without_reusing_existing() {
        let mut dom = doc(vec![elem(5, "div", vec![elem(0, "input", Vec::new())])]);
        assign_node_ids(&mut dom);

        let Node::Document { children, .. } = &dom else {
            panic!("expected document");
        };
        let Node::Element { children: inner, .. } = &children[0] else {
            panic!("expected element");
        };
        assert_eq!(children[0].id(), Id(5));
        assert!(inner[0].id().0 > 5);
    }

    #[test]
    fn ancestor_form_finds_nearest_form() {
        let dom = doc(vec![elem(
            1,
            "form",
            vec![elem(2, "div", vec![elem(3, "input", Vec::new())])],
        )]);

        assert_eq!(ancestor_form(&dom, Id(3)), Some(Id(1)));
        assert_eq!(ancestor_form(&dom, Id(1)), Some(Id(1)));
    }

    #[test]
    fn ancestor_form_none_outside_forms() {
        let dom = doc(vec![elem(1, "div", vec![elem(2, "input", Vec::new())])]);
        assert_eq!(ancestor_form(&dom, Id(2)), None);
    }

    #[test]
    fn parent_of_returns_enclosing_node() {
        let dom = doc(vec![elem(1, "form", vec![elem(2, "input", Vec::new())])]);
        let parent = parent_of(&dom, Id(2)).unwrap();
        assert_eq!(parent.id(), Id(1));

        let top = parent_of(&dom, Id(1)).unwrap();
        assert_eq!(top.id(), Id(0));
    }
}
