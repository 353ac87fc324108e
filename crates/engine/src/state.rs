use formdom::Id;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
struct FieldState {
    value: String,
    checked: bool,
    selections: Vec<String>,
}

/// Central store for live field state, keyed by DOM node id.
///
/// The DOM tree carries structure and static attributes; what a field
/// currently holds lives here, the way a real page separates attributes
/// from live control state.
#[derive(Clone, Debug, Default)]
pub struct FieldStateStore {
    values: HashMap<Id, FieldState>,
}

impl FieldStateStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn has(&self, id: Id) -> bool {
        self.values.contains_key(&id)
    }

    /// Returns the stored text value for this field, if any.
    pub fn get(&self, id: Id) -> Option<&str> {
        self.values.get(&id).map(|s| s.value.as_str())
    }

    /// Set/overwrite the text value for this field.
    pub fn set(&mut self, id: Id, value: String) {
        self.values.entry(id).or_default().value = value;
    }

    /// Ensure an entry exists; if missing, inserts the provided initial value.
    pub fn ensure_initial(&mut self, id: Id, initial: String) {
        self.values.entry(id).or_insert(FieldState {
            value: initial,
            ..FieldState::default()
        });
    }

    pub fn is_checked(&self, id: Id) -> bool {
        self.values.get(&id).is_some_and(|s| s.checked)
    }

    /// Set the checked state. Returns `true` if the state actually changed.
    pub fn set_checked(&mut self, id: Id, checked: bool) -> bool {
        let st = self.values.entry(id).or_default();
        let changed = st.checked != checked;
        st.checked = checked;
        changed
    }

    pub fn ensure_initial_checked(&mut self, id: Id, initial_checked: bool) {
        self.values.entry(id).or_insert(FieldState {
            checked: initial_checked,
            ..FieldState::default()
        });
    }

    pub fn selections(&self, id: Id) -> &[String] {
        self.values.get(&id).map(|s| s.selections.as_slice()).unwrap_or(&[])
    }

    pub fn set_selections(&mut self, id: Id, selections: Vec<String>) {
        self.values.entry(id).or_default().selections = selections;
    }

    pub fn ensure_initial_selections(&mut self, id: Id, initial: Vec<String>) {
        self.values.entry(id).or_insert(FieldState {
            selections: initial,
            ..FieldState::default()
        });
    }

    /// Clear all stored field state. Typically on navigation.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
