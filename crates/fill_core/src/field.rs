use crate::kind::FieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic string identity for one form field.
///
/// The join key between a snapshot and a live field. Opaque: consumers
/// compare and hash it, nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Value union over the field kinds: checked state for checkbox/radio,
/// string for text-like and single selects, string array for
/// multi-selects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
    Selections(Vec<String>),
}

/// One captured field: kind, type token, value and the `name` attribute
/// the name-fallback match keys on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub kind: FieldKind,
    #[serde(rename = "type")]
    pub type_token: String,
    #[serde(default)]
    pub name: String,
    pub value: FieldValue,
}

/// The static attributes of a live field that identity resolution
/// consumes. Integration layers build one of these per field; everything
/// in here is read once at the boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub type_token: String,
    pub name: Option<String>,
    pub id: Option<String>,
    /// The `value` attribute; only consulted for checkbox/radio keys.
    pub value_attr: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub label_text: Option<String>,
    /// Zero-based index among eligible fields of the same kind within
    /// the container. Last-resort disambiguation only.
    pub kind_index: usize,
}

impl FieldDescriptor {
    pub fn name_nonempty(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}
