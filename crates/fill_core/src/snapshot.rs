use crate::field::{FieldKey, FieldRecord};
use crate::key::resolve_key;
use crate::kind::is_csrf_token_name;
use crate::page::LivePage;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A captured form: capture metadata plus an ordered `key -> record`
/// mapping.
///
/// Entries keep capture insertion order because the reconciler's
/// name-fallback match takes the first record with a matching `name` in
/// exactly this order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub url: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub captured_at: u64,
    fields: Vec<(FieldKey, FieldRecord)>,
}

impl Snapshot {
    pub fn new(url: impl Into<String>, captured_at: u64) -> Self {
        Self {
            url: url.into(),
            captured_at,
            fields: Vec::new(),
        }
    }

    pub fn from_entries(
        url: impl Into<String>,
        captured_at: u64,
        fields: Vec<(FieldKey, FieldRecord)>,
    ) -> Self {
        Self {
            url: url.into(),
            captured_at,
            fields,
        }
    }

    /// Insert a record under a key. Keys are unique within one snapshot;
    /// on a duplicate the first record wins and the insert is dropped.
    pub fn insert(&mut self, key: FieldKey, record: FieldRecord) -> bool {
        if self.get(&key).is_some() {
            log::warn!(
                target: "fill.snapshot",
                "duplicate field key dropped: {key}"
            );
            return false;
        }
        self.fields.push((key, record));
        true
    }

    pub fn get(&self, key: &FieldKey) -> Option<&FieldRecord> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    /// First stored record whose `name` equals the given name, in
    /// capture order.
    pub fn find_by_name(&self, name: &str) -> Option<&FieldRecord> {
        self.fields
            .iter()
            .map(|(_, r)| r)
            .find(|r| !r.name.is_empty() && r.name == name)
    }

    pub fn entries(&self) -> &[(FieldKey, FieldRecord)] {
        &self.fields
    }

    pub fn into_entries(self) -> Vec<(FieldKey, FieldRecord)> {
        self.fields
    }

    /// Replace the value of an existing record (the explicit edit flow).
    pub fn set_value(&mut self, key: &FieldKey, value: crate::field::FieldValue) -> bool {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, record)) => {
                record.value = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it.
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Capture every eligible field visible on the page into a snapshot.
///
/// Enumerates in document order, resolves each field's key and extracts
/// the kind-specific value. Does not mutate the page. CSRF-convention
/// names are skipped here and only here; they stay matchable at fill
/// time but never have a stored counterpart.
pub fn build_snapshot<P: LivePage>(page: &P, url: &str) -> Snapshot {
    let mut snapshot = Snapshot::new(url, epoch_millis());

    for field in page.fields() {
        let Some(desc) = page.describe(field) else {
            continue;
        };
        if desc.name_nonempty().is_some_and(is_csrf_token_name) {
            continue;
        }
        let Some(value) = page.read(field) else {
            continue;
        };

        let key = resolve_key(&desc);
        let record = FieldRecord {
            kind: desc.kind,
            type_token: desc.type_token.clone(),
            name: desc.name.clone().unwrap_or_default(),
            value,
        };
        snapshot.insert(key, record);
    }

    log::debug!(
        target: "fill.snapshot",
        "captured {} fields from {url}",
        snapshot.len()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::kind::FieldKind;

    fn record(name: &str, value: &str) -> FieldRecord {
        FieldRecord {
            kind: FieldKind::TextLike,
            type_token: "text".to_string(),
            name: name.to_string(),
            value: FieldValue::Text(value.to_string()),
        }
    }

    #[test]
    fn duplicate_keys_keep_the_first_record() {
        let mut snap = Snapshot::new("https://example.test", 0);
        assert!(snap.insert(FieldKey::from("k"), record("a", "first")));
        assert!(!snap.insert(FieldKey::from("k"), record("a", "second")));

        assert_eq!(snap.len(), 1);
        assert_eq!(
            snap.get(&FieldKey::from("k")).unwrap().value,
            FieldValue::Text("first".to_string())
        );
    }

    #[test]
    fn find_by_name_takes_first_in_capture_order() {
        let mut snap = Snapshot::new("https://example.test", 0);
        snap.insert(FieldKey::from("k1"), record("country", "nl"));
        snap.insert(FieldKey::from("k2"), record("country", "be"));

        assert_eq!(
            snap.find_by_name("country").unwrap().value,
            FieldValue::Text("nl".to_string())
        );
        assert!(snap.find_by_name("missing").is_none());
    }

    #[test]
    fn find_by_name_ignores_records_without_name() {
        let mut snap = Snapshot::new("https://example.test", 0);
        snap.insert(FieldKey::from("k1"), record("", "anon"));

        assert!(snap.find_by_name("").is_none());
    }

    #[test]
    fn set_value_rewrites_existing_record_only() {
        let mut snap = Snapshot::new("https://example.test", 0);
        snap.insert(FieldKey::from("k"), record("city", "old"));

        assert!(snap.set_value(&FieldKey::from("k"), FieldValue::Text("new".to_string())));
        assert!(!snap.set_value(&FieldKey::from("x"), FieldValue::Checked(true)));
        assert_eq!(
            snap.get(&FieldKey::from("k")).unwrap().value,
            FieldValue::Text("new".to_string())
        );
    }

    #[test]
    fn snapshot_serde_round_trips_with_order() {
        let mut snap = Snapshot::new("https://example.test", 42);
        snap.insert(FieldKey::from("b"), record("b", "2"));
        snap.insert(FieldKey::from("a"), record("a", "1"));

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
        assert_eq!(back.entries()[0].0, FieldKey::from("b"));
    }

    #[test]
    fn missing_captured_at_defaults_to_epoch() {
        let json = r#"{"url":"https://example.test","fields":[]}"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.captured_at, 0);
    }
}
