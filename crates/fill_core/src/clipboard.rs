//! Clipboard transfer payload.
//!
//! A snapshot travels between pages as a JSON object carrying a marker
//! field and a format version. Anything on the clipboard that is not a
//! well-formed, marked, version-1 payload is simply "no transferable
//! data" — a soft absence, never an error.

use crate::field::{FieldKey, FieldRecord};
use crate::snapshot::{Snapshot, epoch_millis};
use serde::{Deserialize, Serialize};

/// The only payload version this format defines. Future readers must
/// check it.
pub const PAYLOAD_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Payload {
    #[serde(rename = "formFillPayload")]
    marker: bool,
    version: u32,
    url: String,
    #[serde(rename = "copiedAt")]
    copied_at: u64,
    #[serde(rename = "formData")]
    form_data: Vec<(FieldKey, FieldRecord)>,
}

/// Serialize a snapshot for clipboard transport.
pub fn encode(snapshot: &Snapshot) -> Option<String> {
    let payload = Payload {
        marker: true,
        version: PAYLOAD_VERSION,
        url: snapshot.url.clone(),
        copied_at: epoch_millis(),
        form_data: snapshot.entries().to_vec(),
    };
    serde_json::to_string(&payload).ok()
}

/// Deserialize clipboard text back into a snapshot.
///
/// Returns `None` for malformed JSON, a missing or false marker, or an
/// unknown version.
pub fn decode(text: &str) -> Option<Snapshot> {
    let payload: Payload = match serde_json::from_str(text) {
        Ok(p) => p,
        Err(err) => {
            log::debug!(target: "fill.clipboard", "not a payload: {err}");
            return None;
        }
    };

    if !payload.marker {
        return None;
    }
    if payload.version != PAYLOAD_VERSION {
        log::debug!(
            target: "fill.clipboard",
            "unsupported payload version {}",
            payload.version
        );
        return None;
    }

    Some(Snapshot::from_entries(
        payload.url,
        payload.copied_at,
        payload.form_data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::kind::FieldKind;

    fn sample() -> Snapshot {
        let mut snap = Snapshot::new("https://example.test/form", 7);
        snap.insert(
            FieldKey::from("name=\"email\"type=\"email\""),
            FieldRecord {
                kind: FieldKind::TextLike,
                type_token: "email".to_string(),
                name: "email".to_string(),
                value: FieldValue::Text("a@b.com".to_string()),
            },
        );
        snap.insert(
            FieldKey::from("name=\"news\"type=\"checkbox\""),
            FieldRecord {
                kind: FieldKind::Checkbox,
                type_token: "checkbox".to_string(),
                name: "news".to_string(),
                value: FieldValue::Checked(true),
            },
        );
        snap
    }

    #[test]
    fn encode_decode_round_trip() {
        let snap = sample();
        let text = encode(&snap).unwrap();
        let back = decode(&text).unwrap();

        assert_eq!(back.url, snap.url);
        assert_eq!(back.entries(), snap.entries());
    }

    #[test]
    fn decode_rejects_plain_text_softly() {
        assert!(decode("hello, clipboard").is_none());
        assert!(decode("").is_none());
        assert!(decode("{\"some\":\"json\"}").is_none());
    }

    #[test]
    fn decode_rejects_false_marker() {
        let text = encode(&sample()).unwrap();
        let flipped = text.replacen(
            "\"formFillPayload\":true",
            "\"formFillPayload\":false",
            1,
        );
        assert!(decode(&flipped).is_none());
    }

    #[test]
    fn decode_rejects_future_version() {
        let text = encode(&sample()).unwrap();
        let bumped = text.replacen("\"version\":1", "\"version\":2", 1);
        assert!(decode(&bumped).is_none());
    }
}
