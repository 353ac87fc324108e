//! User-facing operations: capture, apply, clipboard transfer, shortcut
//! dispatch.
//!
//! Every operation funnels into [`run_action`] and comes back as a
//! [`Notice`], the one-line outcome a trigger surface (toolbar, shortcut
//! handler) shows the user. Store failures are the only hard errors;
//! everything else degrades to a notice.

use crate::naming::suggest_preset_name;
use crate::page::DomPage;
use fill_core::{build_snapshot, clipboard, reconcile};
use formdom::Id;
use keys::KeyCombo;
use std::fmt;
use store::{PresetStore, StoreError};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Capture the fields under `container` into a named preset. With no
    /// name, one is suggested from the page.
    Capture {
        container: Option<Id>,
        name: Option<String>,
    },
    /// Fill the page from a stored preset.
    Apply { preset: String },
    /// Capture the fields under `container` onto the clipboard.
    CopyToClipboard { container: Option<Id> },
    /// Fill the page from a clipboard payload, if one is present.
    ApplyFromClipboard,
}

/// Outcome of one action, phrased for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Saved { name: String },
    Filled { fields: usize, passes: usize },
    Copied,
    NoContainer,
    PresetNotFound(String),
    NothingToPaste,
    ClipboardUnavailable,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Saved { name } => write!(f, "saved preset \"{name}\""),
            Notice::Filled { fields, passes } => {
                write!(f, "filled {fields} fields in {passes} passes")
            }
            Notice::Copied => f.write_str("form data copied to clipboard"),
            Notice::NoContainer => f.write_str("no form selected"),
            Notice::PresetNotFound(name) => write!(f, "no preset named \"{name}\""),
            Notice::NothingToPaste => f.write_str("clipboard has no form data"),
            Notice::ClipboardUnavailable => f.write_str("clipboard is unavailable"),
        }
    }
}

/// Host clipboard access. Reads yield `None` when the clipboard is
/// empty or unreadable.
pub trait Clipboard {
    fn read_text(&mut self) -> Option<String>;
    fn write_text(&mut self, text: &str);
}

/// In-memory clipboard, for tests and the demo harness.
#[derive(Debug, Default)]
pub struct MemClipboard {
    content: Option<String>,
}

impl MemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemClipboard {
    fn read_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn write_text(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }
}

/// Capture the container's fields into the store under `name` (or a
/// suggested one) and persist.
pub fn capture_preset(
    page: &mut DomPage,
    container: Id,
    url: &Url,
    name: Option<String>,
    store: &mut PresetStore,
) -> Result<Notice, StoreError> {
    page.set_scope(Some(container));
    let snapshot = build_snapshot(page, url.as_str());
    page.set_scope(None);

    let name = name.unwrap_or_else(|| suggest_preset_name(page.dom(), container));
    store.set(&name, snapshot);
    store.save()?;
    log::info!(target: "engine.actions", "saved preset {name:?}");
    Ok(Notice::Saved { name })
}

/// Fill the whole page from a stored preset.
pub fn apply_preset(
    page: &mut DomPage,
    store: &PresetStore,
    name: &str,
    settle: &mut dyn FnMut(&mut DomPage),
) -> Notice {
    let Some(preset) = store.get(name) else {
        return Notice::PresetNotFound(name.to_string());
    };

    let report = reconcile(page, &preset.snapshot, settle);
    log::info!(
        target: "engine.actions",
        "applied preset {name:?}: {} fields, {} passes",
        report.filled,
        report.passes
    );
    Notice::Filled {
        fields: report.filled,
        passes: report.passes,
    }
}

/// Capture the container's fields and place the transfer payload on the
/// clipboard.
pub fn copy_to_clipboard(
    page: &mut DomPage,
    container: Id,
    url: &Url,
    clip: &mut dyn Clipboard,
) -> Notice {
    page.set_scope(Some(container));
    let snapshot = build_snapshot(page, url.as_str());
    page.set_scope(None);

    match clipboard::encode(&snapshot) {
        Some(text) => {
            clip.write_text(&text);
            Notice::Copied
        }
        None => Notice::ClipboardUnavailable,
    }
}

/// Fill the page from whatever payload the clipboard holds. Non-payload
/// clipboard content is "nothing to paste", never an error.
pub fn paste_from_clipboard(
    page: &mut DomPage,
    clip: &mut dyn Clipboard,
    settle: &mut dyn FnMut(&mut DomPage),
) -> Notice {
    let Some(text) = clip.read_text() else {
        return Notice::NothingToPaste;
    };
    let Some(snapshot) = clipboard::decode(&text) else {
        return Notice::NothingToPaste;
    };

    let report = reconcile(page, &snapshot, settle);
    Notice::Filled {
        fields: report.filled,
        passes: report.passes,
    }
}

/// Map a pressed combo to the action it triggers, if it is bound.
pub fn shortcut_action(store: &PresetStore, combo: &KeyCombo) -> Option<Action> {
    store.preset_for(combo).map(|name| Action::Apply {
        preset: name.to_string(),
    })
}

/// Dispatch one action against a page.
pub fn run_action(
    action: Action,
    page: &mut DomPage,
    url: &Url,
    store: &mut PresetStore,
    clip: &mut dyn Clipboard,
    settle: &mut dyn FnMut(&mut DomPage),
) -> Result<Notice, StoreError> {
    match action {
        Action::Capture { container, name } => match container {
            Some(container) => capture_preset(page, container, url, name, store),
            None => Ok(Notice::NoContainer),
        },
        Action::Apply { preset } => Ok(apply_preset(page, store, &preset, settle)),
        Action::CopyToClipboard { container } => match container {
            Some(container) => Ok(copy_to_clipboard(page, container, url, clip)),
            None => Ok(Notice::NoContainer),
        },
        Action::ApplyFromClipboard => Ok(paste_from_clipboard(page, clip, settle)),
    }
}
