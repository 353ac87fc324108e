use crate::field::{FieldDescriptor, FieldKey};

/// Derive the deterministic key for a field.
///
/// Strictly tiered: the first tier producing a non-empty signature is
/// used in full, tiers are never merged. Every tier ends with the
/// normalized type token so that, say, a radio and a checkbox sharing a
/// name still key apart.
///
/// 1. `name` + `id` (+ `value` attribute for checkbox/radio, which is
///    what separates sibling radios sharing one name).
/// 2. `placeholder` + `aria-label` + associated label text.
/// 3. Zero-based same-kind index within the container. Positionally
///    fragile; only correct while the container's field order is stable
///    between capture and fill.
pub fn resolve_key(desc: &FieldDescriptor) -> FieldKey {
    let mut key = String::new();

    push_part(&mut key, "name", desc.name.as_deref());
    push_part(&mut key, "id", desc.id.as_deref());
    if desc.kind.is_checkable() {
        push_part(&mut key, "value", desc.value_attr.as_deref());
    }

    if key.is_empty() {
        push_part(&mut key, "placeholder", desc.placeholder.as_deref());
        push_part(&mut key, "aria-label", desc.aria_label.as_deref());
        push_part(
            &mut key,
            "label",
            desc.label_text.as_deref().map(str::trim),
        );
    }

    if key.is_empty() {
        key.push_str(&format!("index={}", desc.kind_index));
    }

    key.push_str(&format!("type=\"{}\"", desc.type_token));
    FieldKey::new(key)
}

fn push_part(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value
        && !v.is_empty()
    {
        out.push_str(&format!("{label}=\"{v}\""));
    }
}
