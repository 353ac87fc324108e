//! The live-page boundary.
//!
//! The reconciler and the snapshot builder never touch a concrete DOM;
//! they speak to this trait. Integration layers convert their native
//! node ids to [`FieldId`] at the boundary and deliver event
//! notifications however their host environment does.

use crate::field::{FieldDescriptor, FieldValue};

/// Opaque handle for one live field. The raw value has no meaning in
/// this crate; it is just a key the page understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// Downstream listener notifications a value application must produce.
///
/// Emitting these is a post-condition of applying a value; what firing
/// one concretely means (DOM events, callbacks, nothing in tests) is the
/// page's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    Input,
    Change,
}

/// A live, possibly dynamic document as the fill engine sees it.
///
/// `fields` must re-query on every call: fields can appear between
/// reconciliation passes and a cached list would never see them.
pub trait LivePage {
    /// All eligible fields in document order. Buttons/submit/reset are
    /// already filtered out.
    fn fields(&self) -> Vec<FieldId>;

    /// Static attributes of a field, kind normalized. `None` if the
    /// field vanished since enumeration.
    fn describe(&self, field: FieldId) -> Option<FieldDescriptor>;

    /// Current value in the shape of the field's kind.
    fn read(&self, field: FieldId) -> Option<FieldValue>;

    /// Overwrite a text-like field's value. No notifications.
    fn write_text(&mut self, field: FieldId, value: &str);

    /// Set checked state. Returns `true` if the state actually changed.
    /// No notifications.
    fn set_checked(&mut self, field: FieldId, checked: bool) -> bool;

    /// Activate the label associated with the field, the way a user
    /// click would, firing whatever handlers the host attaches. Returns
    /// `false` when the field has no associated label (nothing
    /// happened).
    fn activate_label(&mut self, field: FieldId) -> bool;

    /// Assign a value to a single-select. Returns `false` when the
    /// assignment did not take because no option matches verbatim.
    fn select_value(&mut self, field: FieldId, value: &str) -> bool;

    /// Explicitly mark the option whose own value equals `value` as
    /// selected. Returns `false` when no such option exists.
    fn select_exact_option(&mut self, field: FieldId, value: &str) -> bool;

    /// Full-replace a multi-select: every option's selected flag becomes
    /// membership of its value in `values`. No notifications.
    fn replace_selections(&mut self, field: FieldId, values: &[String]);

    /// Deliver a notification to downstream listeners.
    fn notify(&mut self, field: FieldId, notification: Notification);
}
