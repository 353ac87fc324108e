//! Demo harness: captures a filled-in form as a preset, then refills a
//! blank copy of the same form and prints what happened.

use engine::{DomPage, apply_preset, capture_preset};
use fill_core::{FieldValue, LivePage};
use formdom::{Id, Node};
use picker::Picker;
use store::PresetStore;
use url::Url;

fn elem(name: &str, attributes: Vec<(String, Option<String>)>, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id(0),
        name: name.to_string(),
        attributes,
        children,
    }
}

fn input(type_token: &str, mut attributes: Vec<(String, Option<String>)>) -> Node {
    attributes.insert(0, a("type", type_token));
    elem("input", attributes, Vec::new())
}

fn text(content: &str) -> Node {
    Node::Text {
        id: Id(0),
        text: content.to_string(),
    }
}

fn a(k: &str, v: &str) -> (String, Option<String>) {
    (k.to_string(), Some(v.to_string()))
}

fn demo_form(filled: bool) -> Node {
    let city_attrs = if filled {
        vec![a("name", "city"), a("value", "Delft")]
    } else {
        vec![a("name", "city")]
    };
    let mut news_attrs = vec![a("name", "newsletter"), a("id", "newsletter")];
    if filled {
        news_attrs.push(("checked".to_string(), None));
    }

    Node::Document {
        id: Id(0),
        children: vec![elem(
            "form",
            vec![a("id", "signup")],
            vec![
                elem("h2", Vec::new(), vec![text("Sign up")]),
                input("text", city_attrs),
                elem(
                    "label",
                    vec![a("for", "newsletter")],
                    vec![text("Newsletter")],
                ),
                input("checkbox", news_attrs),
            ],
        )],
    }
}

fn form_id(page: &DomPage) -> Option<Id> {
    let mut found = None;
    formdom::for_each_element(page.dom(), &mut |n| {
        if found.is_none() && n.is_element_named("form") {
            found = Some(n.id());
        }
    });
    found
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = match std::env::args().nth(1) {
        Some(path) => std::path::PathBuf::from(path),
        None => std::env::temp_dir().join("formfill-demo"),
    };
    let mut store = PresetStore::load(&dir)?;
    let url = Url::parse("https://example.test/signup")?;

    let mut source = DomPage::new(demo_form(true));

    // Stand in for the interactive pick: hover the form, commit.
    let picker = Picker::new();
    let mut session = picker.start()?;
    if let Some(form) = form_id(&source) {
        session.hover(form);
    }
    let container = session.commit().ok_or("no container picked")?;

    let notice = capture_preset(&mut source, container, &url, None, &mut store)?;
    println!("{notice}");

    let mut target = DomPage::new(demo_form(false));
    let notice = apply_preset(&mut target, &store, "Sign up", &mut |_| {});
    println!("{notice}");

    for field in target.fields() {
        let Some(desc) = target.describe(field) else {
            continue;
        };
        let name = desc.name.unwrap_or_default();
        match target.read(field) {
            Some(FieldValue::Text(v)) => println!("  {name} = {v:?}"),
            Some(FieldValue::Checked(c)) => println!("  {name} = {c}"),
            Some(FieldValue::Selections(s)) => println!("  {name} = {s:?}"),
            None => {}
        }
    }

    Ok(())
}
