//! # fill_core
//!
//! DOM-agnostic form snapshot and fill engine.
//!
//! The hard problem here is identity: a form field has no stable,
//! globally unique key across page loads or dynamic re-renders. This
//! crate carries the two pieces that solve it:
//!
//! - [`resolve_key`]: deterministic key derivation with tiered fallback,
//!   used identically when capturing and when matching.
//! - [`reconcile`]: the multi-pass fill loop that applies a stored
//!   [`Snapshot`] to a live page, converging over several passes because
//!   filling one field can make new fields appear.
//!
//! The crate never touches a concrete DOM. Integration layers implement
//! [`LivePage`] over their own document type and convert their node ids
//! to [`FieldId`] at the boundary.

pub mod clipboard;
mod field;
mod key;
mod kind;
mod page;
mod reconcile;
mod snapshot;

pub use field::{FieldDescriptor, FieldKey, FieldRecord, FieldValue};
pub use key::resolve_key;
pub use kind::{FieldKind, is_csrf_token_name, is_excluded_control, normalize_kind};
pub use page::{FieldId, LivePage, Notification};
pub use reconcile::{FillReport, MAX_PASSES, reconcile};
pub use snapshot::{Snapshot, build_snapshot, epoch_millis};
