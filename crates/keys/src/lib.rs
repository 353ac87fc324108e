//! Canonical keyboard shortcut combos.
//!
//! A combo is stored and compared as its canonical string: modifiers in
//! the fixed order `Alt, Ctrl, Shift, Meta`, then one primary key
//! token, joined with `+`. Canonicalization is what makes a combo typed
//! in a settings screen equal to the same combo observed on a page.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One keyboard shortcut: modifier flags plus a canonical key token.
///
/// At least one modifier is always set; a bare key never forms a combo.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
    key: String,
}

impl KeyCombo {
    /// Build a combo from modifier flags and a raw key as reported by
    /// the host. Returns `None` without any modifier, or when the key
    /// has no canonical token.
    pub fn new(alt: bool, ctrl: bool, shift: bool, meta: bool, raw_key: &str) -> Option<Self> {
        if !(alt || ctrl || shift || meta) {
            return None;
        }
        let key = canonical_key_token(raw_key)?;
        Some(Self {
            alt,
            ctrl,
            shift,
            meta,
            key,
        })
    }

    /// Parse the canonical `+`-joined form, e.g. `Alt+Shift+F`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut alt = false;
        let mut ctrl = false;
        let mut shift = false;
        let mut meta = false;
        let mut key: Option<String> = None;

        for part in s.split('+') {
            match part {
                "Alt" => alt = true,
                "Ctrl" => ctrl = true,
                "Shift" => shift = true,
                "Meta" => meta = true,
                other => {
                    // Exactly one primary key, and it must come last.
                    if key.is_some() {
                        return None;
                    }
                    key = Some(canonical_key_token(other)?);
                }
            }
        }

        let combo = Self::new(alt, ctrl, shift, meta, key.as_deref()?)?;
        // Reject non-canonical spellings so parse(display(x)) == x is
        // the only accepted form.
        if combo.to_string() != s {
            return None;
        }
        Some(combo)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.meta {
            f.write_str("Meta+")?;
        }
        f.write_str(&self.key)
    }
}

impl Serialize for KeyCombo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyCombo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyCombo::parse(&s).ok_or_else(|| D::Error::custom(format!("invalid key combo: {s:?}")))
    }
}

/// Canonical token for a primary key, `None` for keys that cannot take
/// part in a shortcut.
///
/// Letters uppercase, digits pass through, `F1`..`F24` pass through,
/// a handful of special keys map to their common names.
pub fn canonical_key_token(raw: &str) -> Option<String> {
    // F-keys: "F" followed by a number.
    if let Some(n) = raw.strip_prefix('F')
        && !n.is_empty()
        && n.chars().all(|c| c.is_ascii_digit())
    {
        return Some(raw.to_string());
    }

    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c.to_ascii_uppercase().to_string());
        }
        if c.is_ascii_digit() {
            return Some(c.to_string());
        }
        if c == ' ' {
            return Some("Space".to_string());
        }
        return None;
    }

    match raw {
        "Space" => Some("Space".to_string()),
        "Escape" | "Esc" => Some("Esc".to_string()),
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Enter" | "Tab" | "Delete"
        | "Backspace" | "Home" | "End" | "PageUp" | "PageDown" => Some(raw.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_order_is_fixed() {
        let combo = KeyCombo::new(true, true, true, true, "f").unwrap();
        assert_eq!(combo.to_string(), "Alt+Ctrl+Shift+Meta+F");
    }

    #[test]
    fn letters_uppercase_digits_pass_through() {
        assert_eq!(
            KeyCombo::new(false, true, false, false, "k").unwrap().to_string(),
            "Ctrl+K"
        );
        assert_eq!(
            KeyCombo::new(true, false, false, false, "3").unwrap().to_string(),
            "Alt+3"
        );
    }

    #[test]
    fn special_keys_map_to_common_names() {
        assert_eq!(canonical_key_token(" ").as_deref(), Some("Space"));
        assert_eq!(canonical_key_token("Escape").as_deref(), Some("Esc"));
        assert_eq!(canonical_key_token("ArrowUp").as_deref(), Some("ArrowUp"));
        assert_eq!(canonical_key_token("F12").as_deref(), Some("F12"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(canonical_key_token("MediaPlayPause").is_none());
        assert!(canonical_key_token("√").is_none());
        assert!(KeyCombo::new(true, false, false, false, "CapsLock").is_none());
    }

    #[test]
    fn combo_requires_a_modifier() {
        assert!(KeyCombo::new(false, false, false, false, "F").is_none());
        assert!(KeyCombo::parse("F").is_none());
    }

    #[test]
    fn parse_round_trips_with_display() {
        for s in ["Alt+F", "Ctrl+Shift+Enter", "Alt+Ctrl+Shift+Meta+Space"] {
            let combo = KeyCombo::parse(s).unwrap();
            assert_eq!(combo.to_string(), s);
        }
    }

    #[test]
    fn parse_rejects_non_canonical_order() {
        assert!(KeyCombo::parse("Shift+Alt+F").is_none());
        assert!(KeyCombo::parse("Alt+f").is_none());
        assert!(KeyCombo::parse("Alt+F+G").is_none());
        assert!(KeyCombo::parse("").is_none());
    }

    #[test]
    fn serde_uses_the_canonical_string() {
        let combo = KeyCombo::parse("Alt+Shift+P").unwrap();
        let json = serde_json::to_string(&combo).unwrap();
        assert_eq!(json, "\"Alt+Shift+P\"");

        let back: KeyCombo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, combo);

        assert!(serde_json::from_str::<KeyCombo>("\"nope\"").is_err());
    }
}
