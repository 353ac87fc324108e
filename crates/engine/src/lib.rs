//! Integration layer for the fill engine.
//!
//! `fill_core` is deliberately DOM-agnostic; this crate supplies the
//! concrete page: [`DomPage`] implements `LivePage` over a `formdom`
//! tree backed by a [`FieldStateStore`], and [`run_action`] wires
//! capture, fill, clipboard transfer and shortcut dispatch into
//! outcomes a trigger surface can show.

mod actions;
mod naming;
mod page;
mod state;
#[cfg(test)]
mod testdom;

pub use actions::{
    Action, Clipboard, MemClipboard, Notice, apply_preset, capture_preset, copy_to_clipboard,
    paste_from_clipboard, run_action, shortcut_action,
};
pub use naming::suggest_preset_name;
pub use page::DomPage;
pub use state::FieldStateStore;
