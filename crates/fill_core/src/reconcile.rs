//! Multi-pass fill reconciliation.
//!
//! Filling one field can make the live form grow: checking a box
//! reveals a conditional section, picking a country rebuilds a province
//! select. A single sweep over the fields present at the start would
//! miss all of that, so the reconciler sweeps repeatedly — fresh field
//! query each pass — until a pass fills nothing new, or the pass cap is
//! reached.

use crate::field::{FieldDescriptor, FieldRecord, FieldValue};
use crate::key::resolve_key;
use crate::kind::FieldKind;
use crate::page::{FieldId, LivePage, Notification};
use crate::snapshot::Snapshot;
use std::collections::HashSet;

/// Hard bound on reconciliation passes; bounds pathological oscillation.
pub const MAX_PASSES: usize = 10;

/// Outcome of one reconciliation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Productive passes: passes that filled at least one new field.
    /// The terminal no-progress sweep is not counted.
    pub passes: usize,
    /// Distinct fields filled across all passes.
    pub filled: usize,
    /// Fields matched by exact key.
    pub by_key: usize,
    /// Fields salvaged through the name fallback.
    pub by_name: usize,
}

/// Apply a snapshot to a live page.
///
/// `settle` runs between passes (never mid-pass, never after the last
/// one): the host's chance to let its layout/mutation pipeline catch up
/// before the next query. The engine itself never sleeps or blocks.
///
/// Reaching the pass cap with unmatched fields left over is an expected
/// terminal state, not an error.
pub fn reconcile<P: LivePage>(
    page: &mut P,
    snapshot: &Snapshot,
    settle: &mut dyn FnMut(&mut P),
) -> FillReport {
    let mut filled = HashSet::new();
    let mut report = FillReport::default();

    for pass in 1..=MAX_PASSES {
        let mut new_this_pass = 0usize;

        for field in page.fields() {
            let Some(desc) = page.describe(field) else {
                continue;
            };
            let key = resolve_key(&desc);
            if filled.contains(&key) {
                continue;
            }

            if let Some(record) = snapshot.get(&key) {
                if apply_record(page, field, &desc, record) {
                    filled.insert(key);
                    new_this_pass += 1;
                    report.by_key += 1;
                }
            } else if let Some(name) = desc.name_nonempty()
                && let Some(record) = snapshot.find_by_name(name)
                && name_fallback_allowed(&desc, record)
                && apply_record(page, field, &desc, record)
            {
                log::debug!(
                    target: "fill.reconcile",
                    "name fallback matched field {name:?}"
                );
                filled.insert(key);
                new_this_pass += 1;
                report.by_name += 1;
            }
        }

        log::trace!(
            target: "fill.reconcile",
            "pass {pass}: {new_this_pass} new fields filled"
        );

        // Fixed point: nothing new this pass, nothing will change next pass.
        if new_this_pass == 0 {
            break;
        }
        report.passes += 1;
        if pass == MAX_PASSES {
            log::debug!(target: "fill.reconcile", "pass cap reached");
            break;
        }

        settle(page);
    }

    report.filled = filled.len();
    report
}

/// Kind guard for the name fallback: a checkbox's boolean must never be
/// cross-assigned onto an unrelated radio (or vice versa).
fn name_fallback_allowed(desc: &FieldDescriptor, record: &FieldRecord) -> bool {
    if desc.kind.is_checkable() {
        record.kind == desc.kind
    } else {
        true
    }
}

/// Apply one stored record to one live field, per its kind.
///
/// Idempotent: an already-correct value is left alone and emits no
/// notification, but still reports success so the field is not
/// revisited. Returns `false` only when the stored value's shape does
/// not fit the live field's kind; such fields are left untouched.
fn apply_record<P: LivePage>(
    page: &mut P,
    field: FieldId,
    desc: &FieldDescriptor,
    record: &FieldRecord,
) -> bool {
    let Some(current) = page.read(field) else {
        return false;
    };

    match (desc.kind, &record.value) {
        (FieldKind::Checkbox | FieldKind::Radio, FieldValue::Checked(want)) => {
            if current == FieldValue::Checked(*want) {
                return true;
            }
            if *want {
                // A label click mirrors how a real user toggles the
                // control, so attached handlers fire. Unchecking skips
                // it: label activation is not reliably invertible.
                if !page.activate_label(field) {
                    page.set_checked(field, true);
                    page.notify(field, Notification::Change);
                }
            } else if page.set_checked(field, false) {
                page.notify(field, Notification::Change);
            }
            true
        }

        (FieldKind::SelectSingle, FieldValue::Text(want)) => {
            if current == FieldValue::Text(want.clone()) {
                return true;
            }
            if !page.select_value(field, want) {
                // Assignment did not take; hunt for the option explicitly.
                page.select_exact_option(field, want);
            }
            page.notify(field, Notification::Change);
            true
        }

        (FieldKind::SelectMultiple, FieldValue::Selections(want)) => {
            if selections_equal(&current, want) {
                return true;
            }
            page.replace_selections(field, want);
            page.notify(field, Notification::Change);
            true
        }

        (FieldKind::TextLike, FieldValue::Text(want)) => {
            if current == FieldValue::Text(want.clone()) {
                return true;
            }
            page.write_text(field, want);
            page.notify(field, Notification::Input);
            page.notify(field, Notification::Change);
            true
        }

        _ => false,
    }
}

fn selections_equal(current: &FieldValue, want: &[String]) -> bool {
    let FieldValue::Selections(current) = current else {
        return false;
    };
    let mut a: Vec<&str> = current.iter().map(String::as_str).collect();
    let mut b: Vec<&str> = want.iter().map(String::as_str).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
