//! Element-picker sessions.
//!
//! One picker, at most one active session. The session is an explicit
//! object owned by whoever started the pick; it tracks the hovered node
//! and ends through `commit` or `cancel` (or by being dropped, which
//! counts as a cancel). A second start while a session lives is
//! refused.

use formdom::Id;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Returned when a pick is already in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickerBusy;

impl fmt::Display for PickerBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an element pick is already in progress")
    }
}

impl std::error::Error for PickerBusy {}

#[derive(Default)]
pub struct Picker {
    active: Rc<Cell<bool>>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a pick. Fails while another session is alive.
    pub fn start(&self) -> Result<PickerSession, PickerBusy> {
        if self.active.get() {
            return Err(PickerBusy);
        }
        self.active.set(true);
        Ok(PickerSession {
            active: Rc::clone(&self.active),
            hovered: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// One in-flight pick. Ends via [`commit`](Self::commit),
/// [`cancel`](Self::cancel), or drop.
#[derive(Debug)]
pub struct PickerSession {
    active: Rc<Cell<bool>>,
    hovered: Option<Id>,
}

impl PickerSession {
    /// Track the element currently under the pointer.
    pub fn hover(&mut self, node: Id) {
        self.hovered = Some(node);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    /// End the session, yielding the picked element if any.
    pub fn commit(self) -> Option<Id> {
        self.hovered
    }

    /// End the session without a pick.
    pub fn cancel(self) {}
}

impl Drop for PickerSession {
    fn drop(&mut self) {
        self.active.set(false);
    }
}
