//! DOM constructors shared by the unit tests. Id 0 means "assign me".

use formdom::{Id, Node};

pub fn doc(children: Vec<Node>) -> Node {
    Node::Document {
        id: Id(0),
        children,
    }
}

pub fn elem(
    id: u32,
    name: &str,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<Node>,
) -> Node {
    Node::Element {
        id: Id(id),
        name: name.to_string(),
        attributes,
        children,
    }
}

pub fn input(id: u32, type_token: &str, mut attributes: Vec<(String, Option<String>)>) -> Node {
    attributes.insert(0, a("type", type_token));
    elem(id, "input", attributes, Vec::new())
}

pub fn text(id: u32, content: &str) -> Node {
    Node::Text {
        id: Id(id),
        text: content.to_string(),
    }
}

pub fn a(k: &str, v: &str) -> (String, Option<String>) {
    (k.to_string(), Some(v.to_string()))
}
