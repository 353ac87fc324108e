//! `DomPage`: the live-page adapter over a `formdom` tree.
//!
//! Structure and static attributes live in the DOM; current field state
//! lives in a [`FieldStateStore`] seeded from the attributes. The fill
//! engine talks to this through `fill_core::LivePage`, with node ids as
//! field handles.

use crate::state::FieldStateStore;
use fill_core::{
    FieldDescriptor, FieldId, FieldKind, FieldValue, LivePage, Notification, is_excluded_control,
    normalize_kind,
};
use formdom::{Id, Node, assign_node_ids, attr, find_node_by_id, has_attr, label_text_for_field};

pub struct DomPage {
    dom: Node,
    scope: Option<Id>,
    store: FieldStateStore,
    events: Vec<(FieldId, Notification)>,
}

impl DomPage {
    pub fn new(mut dom: Node) -> Self {
        assign_node_ids(&mut dom);
        let mut page = Self {
            dom,
            scope: None,
            store: FieldStateStore::new(),
            events: Vec::new(),
        };
        page.seed();
        page
    }

    pub fn dom(&self) -> &Node {
        &self.dom
    }

    /// Mutable access for structural edits (dynamic reveals). Call
    /// [`refresh`](Self::refresh) afterwards so new nodes get ids and
    /// seeded state.
    pub fn dom_mut(&mut self) -> &mut Node {
        &mut self.dom
    }

    pub fn refresh(&mut self) {
        assign_node_ids(&mut self.dom);
        self.seed();
    }

    /// Restrict field enumeration to a container subtree (capture), or
    /// lift the restriction with `None` (fill sees the whole document).
    pub fn set_scope(&mut self, scope: Option<Id>) {
        self.scope = scope;
    }

    pub fn store(&self) -> &FieldStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FieldStateStore {
        &mut self.store
    }

    /// Drain the notifications emitted since the last call.
    pub fn take_events(&mut self) -> Vec<(FieldId, Notification)> {
        std::mem::take(&mut self.events)
    }

    /// Seed live state for every field that has none yet, from the
    /// markup: `value`/`checked` attributes, textarea child text,
    /// `selected` options. Existing state wins; re-seeding after a
    /// reveal only touches the new nodes.
    fn seed(&mut self) {
        let mut seeds: Vec<(Id, Seed)> = Vec::new();
        collect_seeds(&self.dom, &mut seeds);

        for (id, seed) in seeds {
            match seed {
                Seed::Text(initial) => self.store.ensure_initial(id, initial),
                Seed::Checked(initial) => self.store.ensure_initial_checked(id, initial),
                Seed::Selections(initial) => self.store.ensure_initial_selections(id, initial),
            }
        }
    }

    fn scope_node(&self) -> &Node {
        self.scope
            .and_then(|id| find_node_by_id(&self.dom, id))
            .unwrap_or(&self.dom)
    }

    fn node(&self, field: FieldId) -> Option<&Node> {
        find_node_by_id(&self.dom, Id(field.as_raw() as u32))
    }

    fn option_values(&self, field: FieldId) -> Vec<String> {
        self.node(field)
            .map(|n| select_options(n).into_iter().map(|(v, _)| v).collect())
            .unwrap_or_default()
    }
}

impl LivePage for DomPage {
    fn fields(&self) -> Vec<FieldId> {
        eligible_field_nodes(self.scope_node())
            .iter()
            .map(|n| FieldId::from_raw(n.id().0 as u64))
            .collect()
    }

    fn describe(&self, field: FieldId) -> Option<FieldDescriptor> {
        let node = self.node(field)?;
        let (kind, type_token) = classify(node)?;
        if is_excluded_control(&type_token) {
            return None;
        }

        // Same-kind index within the field's own container, for the
        // last-resort key tier. The container is the nearest enclosing
        // form, or the whole document outside any form — never the
        // enumeration scope, which differs between capture and fill.
        let container = formdom::ancestor_form(&self.dom, node.id())
            .and_then(|id| find_node_by_id(&self.dom, id))
            .unwrap_or(&self.dom);
        let kind_index = eligible_field_nodes(container)
            .iter()
            .filter(|n| classify(n).is_some_and(|(k, _)| k == kind))
            .position(|n| n.id() == node.id())
            .unwrap_or(0);

        Some(FieldDescriptor {
            kind,
            type_token,
            name: attr(node, "name").map(str::to_string),
            id: attr(node, "id").map(str::to_string),
            value_attr: attr(node, "value").map(str::to_string),
            placeholder: attr(node, "placeholder").map(str::to_string),
            aria_label: attr(node, "aria-label").map(str::to_string),
            label_text: label_text_for_field(&self.dom, node),
            kind_index,
        })
    }

    fn read(&self, field: FieldId) -> Option<FieldValue> {
        let node = self.node(field)?;
        let (kind, _) = classify(node)?;
        let id = node.id();

        Some(match kind {
            FieldKind::Checkbox | FieldKind::Radio => FieldValue::Checked(self.store.is_checked(id)),
            FieldKind::SelectSingle => FieldValue::Text(
                self.store
                    .selections(id)
                    .first()
                    .cloned()
                    .unwrap_or_default(),
            ),
            FieldKind::SelectMultiple => FieldValue::Selections(self.store.selections(id).to_vec()),
            FieldKind::TextLike => FieldValue::Text(self.store.get(id).unwrap_or("").to_string()),
        })
    }

    fn write_text(&mut self, field: FieldId, value: &str) {
        self.store.set(Id(field.as_raw() as u32), value.to_string());
    }

    fn set_checked(&mut self, field: FieldId, checked: bool) -> bool {
        self.store.set_checked(Id(field.as_raw() as u32), checked)
    }

    fn activate_label(&mut self, field: FieldId) -> bool {
        let node_id = Id(field.as_raw() as u32);
        let Some(node) = find_node_by_id(&self.dom, node_id) else {
            return false;
        };
        let Some(field_id_attr) = attr(node, "id") else {
            return false;
        };
        if formdom::label_for(&self.dom, field_id_attr).is_none() {
            return false;
        }
        let Some((kind, _)) = classify(node) else {
            return false;
        };

        // A label click toggles a checkbox and selects a radio, and the
        // control's change handlers fire.
        let checked = match kind {
            FieldKind::Checkbox => !self.store.is_checked(node_id),
            FieldKind::Radio => true,
            _ => return false,
        };
        self.store.set_checked(node_id, checked);
        self.events.push((field, Notification::Change));
        true
    }

    fn select_value(&mut self, field: FieldId, value: &str) -> bool {
        let options = self.option_values(field);
        if options.iter().any(|o| o == value) {
            self.store
                .set_selections(Id(field.as_raw() as u32), vec![value.to_string()]);
            true
        } else {
            false
        }
    }

    fn select_exact_option(&mut self, field: FieldId, value: &str) -> bool {
        // Explicit walk over the option list; on this page the outcome
        // matches select_value, but the engine treats them as distinct
        // paths.
        let options = self.option_values(field);
        match options.iter().find(|o| o.as_str() == value) {
            Some(found) => {
                self.store
                    .set_selections(Id(field.as_raw() as u32), vec![found.clone()]);
                true
            }
            None => false,
        }
    }

    fn replace_selections(&mut self, field: FieldId, values: &[String]) {
        let options = self.option_values(field);
        let selected: Vec<String> = options
            .into_iter()
            .filter(|o| values.contains(o))
            .collect();
        self.store
            .set_selections(Id(field.as_raw() as u32), selected);
    }

    fn notify(&mut self, field: FieldId, notification: Notification) {
        self.events.push((field, notification));
    }
}

/// Kind and type token for a field element, `None` for non-fields.
fn classify(node: &Node) -> Option<(FieldKind, String)> {
    let tag = node.tag()?;
    if !(tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("select")
        || tag.eq_ignore_ascii_case("textarea"))
    {
        return None;
    }
    Some(normalize_kind(tag, attr(node, "type"), has_attr(node, "multiple")))
}

/// All eligible field elements under `scope`, document order.
fn eligible_field_nodes(scope: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    formdom::for_each_element(scope, &mut |n| {
        if let Some((_, token)) = classify(n)
            && !is_excluded_control(&token)
        {
            out.push(n);
        }
    });
    out
}

/// `(value, selected)` for each `<option>` of a select, in document
/// order. An option without a `value` attribute takes its trimmed text.
fn select_options(node: &Node) -> Vec<(String, bool)> {
    let mut out = Vec::new();
    formdom::for_each_element(node, &mut |n| {
        if n.is_element_named("option") {
            let value = attr(n, "value")
                .map(str::to_string)
                .or_else(|| formdom::text_content(n))
                .unwrap_or_default();
            out.push((value, has_attr(n, "selected")));
        }
    });
    out
}

enum Seed {
    Text(String),
    Checked(bool),
    Selections(Vec<String>),
}

fn collect_seeds(node: &Node, out: &mut Vec<(Id, Seed)>) {
    if let Some((kind, token)) = classify(node) {
        if !is_excluded_control(&token) {
            let seed = match kind {
                FieldKind::Checkbox | FieldKind::Radio => Seed::Checked(has_attr(node, "checked")),
                FieldKind::SelectSingle | FieldKind::SelectMultiple => {
                    Seed::Selections(initial_selections(node, kind))
                }
                FieldKind::TextLike if node.is_element_named("textarea") => {
                    Seed::Text(textarea_initial(node))
                }
                FieldKind::TextLike => {
                    Seed::Text(attr(node, "value").unwrap_or("").to_string())
                }
            };
            out.push((node.id(), seed));
        }
        // Fields never nest fields; option children were handled above.
        return;
    }

    for c in node.children() {
        collect_seeds(c, out);
    }
}

fn initial_selections(node: &Node, kind: FieldKind) -> Vec<String> {
    let options = select_options(node);
    let selected: Vec<String> = options
        .iter()
        .filter(|(_, sel)| *sel)
        .map(|(v, _)| v.clone())
        .collect();

    match kind {
        FieldKind::SelectMultiple => selected,
        _ => {
            // Single select: the last `selected` option wins; with none,
            // the first option is the browser default.
            if let Some(last) = selected.last() {
                vec![last.clone()]
            } else if let Some((first, _)) = options.first() {
                vec![first.clone()]
            } else {
                Vec::new()
            }
        }
    }
}

fn textarea_initial(node: &Node) -> String {
    let mut raw = String::new();
    formdom::collect_text(node.children(), &mut raw);
    let mut initial = normalize_newlines(&raw);

    // HTML textarea parsing: a leading newline is stripped.
    if initial.starts_with('\n') {
        initial.remove(0);
    }
    initial
}

fn normalize_newlines(s: &str) -> String {
    if !s.contains('\r') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    out
}
