use serde::{Deserialize, Serialize};

/// Closed set of field kinds the engine distinguishes.
///
/// Kind is resolved once, when a field first crosses into the engine
/// (capture or fill); downstream logic matches on this tag and never
/// re-inspects raw attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Text, textarea, number, email, ... — anything not specially handled.
    #[default]
    TextLike,
    Checkbox,
    Radio,
    SelectSingle,
    SelectMultiple,
}

impl FieldKind {
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// Normalize a field element into its kind and its type token.
///
/// The token is what goes into field keys: a `<select>` normalizes to
/// `select` or `select-multiple` (its native type attribute is
/// unreliable), an `<input>` uses its lowercased `type` attribute
/// defaulting to `text`, and any other tag is typed by its tag name.
/// Capture and fill must both go through here or keys will silently
/// fail to match.
pub fn normalize_kind(tag: &str, type_attr: Option<&str>, multiple: bool) -> (FieldKind, String) {
    if tag.eq_ignore_ascii_case("select") {
        return if multiple {
            (FieldKind::SelectMultiple, "select-multiple".to_string())
        } else {
            (FieldKind::SelectSingle, "select".to_string())
        };
    }

    if tag.eq_ignore_ascii_case("input") {
        let token = type_attr
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string());

        let kind = match token.as_str() {
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            _ => FieldKind::TextLike,
        };
        return (kind, token);
    }

    (FieldKind::TextLike, tag.to_ascii_lowercase())
}

/// Control tokens that are never captured or filled.
pub fn is_excluded_control(token: &str) -> bool {
    matches!(token, "button" | "submit" | "reset")
}

/// CSRF-token naming convention; such fields are skipped at capture
/// time (they stay in the fill matching pool, they just never have a
/// stored counterpart).
pub fn is_csrf_token_name(name: &str) -> bool {
    name == "_token" || name.contains("[_token]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_normalizes_by_multiple_attribute() {
        assert_eq!(
            normalize_kind("select", None, false),
            (FieldKind::SelectSingle, "select".to_string())
        );
        assert_eq!(
            normalize_kind("SELECT", Some("select-one"), true),
            (FieldKind::SelectMultiple, "select-multiple".to_string())
        );
    }

    #[test]
    fn input_without_type_defaults_to_text() {
        assert_eq!(
            normalize_kind("input", None, false),
            (FieldKind::TextLike, "text".to_string())
        );
        assert_eq!(
            normalize_kind("input", Some("  "), false),
            (FieldKind::TextLike, "text".to_string())
        );
    }

    #[test]
    fn input_type_is_lowercased() {
        assert_eq!(
            normalize_kind("input", Some("EMAIL"), false),
            (FieldKind::TextLike, "email".to_string())
        );
        assert_eq!(
            normalize_kind("input", Some("Radio"), false),
            (FieldKind::Radio, "radio".to_string())
        );
    }

    #[test]
    fn untyped_tags_use_tag_name() {
        assert_eq!(
            normalize_kind("TEXTAREA", None, false),
            (FieldKind::TextLike, "textarea".to_string())
        );
    }

    #[test]
    fn csrf_convention_matches() {
        assert!(is_csrf_token_name("_token"));
        assert!(is_csrf_token_name("user[_token]"));
        assert!(!is_csrf_token_name("token"));
        assert!(!is_csrf_token_name("_tokens"));
    }

    #[test]
    fn buttons_are_excluded() {
        assert!(is_excluded_control("submit"));
        assert!(is_excluded_control("button"));
        assert!(is_excluded_control("reset"));
        assert!(!is_excluded_control("text"));
    }
}
