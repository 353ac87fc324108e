//! Durable preset and shortcut storage.
//!
//! A single JSON file holds every named preset, the shortcut bindings
//! pointing at them, and the one reserved popover combo. All mutation
//! happens in memory; [`PresetStore::save`] persists the whole state in
//! one write, so compound edits (rename plus shortcut rebind) land
//! atomically or not at all.

use fill_core::{Snapshot, epoch_millis};
use keys::KeyCombo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "formfill.json";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store i/o error: {e}"),
            StoreError::Json(e) => write!(f, "store format error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// A named, stored snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub snapshot: Snapshot,
    /// Milliseconds since the Unix epoch. Records written before this
    /// field existed default to the epoch so sorting stays stable.
    #[serde(default)]
    pub saved_at: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    presets: HashMap<String, Preset>,
    /// combo -> preset name. At most one preset per combo.
    #[serde(default)]
    shortcuts: HashMap<KeyCombo, String>,
    /// The reserved "open picker popover" combo.
    #[serde(default)]
    popover_shortcut: Option<KeyCombo>,
}

/// Store over one JSON file in a caller-supplied directory.
pub struct PresetStore {
    path: PathBuf,
    data: StoreData,
}

impl PresetStore {
    /// Load the store from `dir`. A missing file is an empty store.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(STORE_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(e.into()),
        };
        log::debug!(
            target: "store",
            "loaded {} presets, {} shortcuts",
            data.presets.len(),
            data.shortcuts.len()
        );
        Ok(Self { path, data })
    }

    /// Persist the full state. Writes a temp file first and renames it
    /// into place so a crash never leaves a half-written store behind.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.data.presets.get(name)
    }

    /// Store a snapshot under a name, stamping `saved_at` now.
    /// Overwrites any existing preset of that name.
    pub fn set(&mut self, name: &str, snapshot: Snapshot) {
        self.data.presets.insert(
            name.to_string(),
            Preset {
                snapshot,
                saved_at: epoch_millis(),
            },
        );
    }

    /// Delete a preset and release any shortcut bound to it.
    pub fn delete(&mut self, name: &str) -> bool {
        let existed = self.data.presets.remove(name).is_some();
        if existed {
            self.data.shortcuts.retain(|_, preset| preset != name);
        }
        existed
    }

    /// All presets, newest first; name breaks ties so the order is
    /// total.
    pub fn list_all(&self) -> Vec<(&str, &Preset)> {
        let mut all: Vec<(&str, &Preset)> = self
            .data
            .presets
            .iter()
            .map(|(n, p)| (n.as_str(), p))
            .collect();
        all.sort_by(|(an, ap), (bn, bp)| bp.saved_at.cmp(&ap.saved_at).then(an.cmp(bn)));
        all
    }

    /// Rename a preset: delete-old/insert-new, rebinding any shortcut
    /// pointing at the old name in the same step. Returns `false` when
    /// the old name does not exist. Renaming onto an existing name
    /// overwrites it.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.data.presets.contains_key(old);
        }
        let Some(preset) = self.data.presets.remove(old) else {
            return false;
        };
        self.data.presets.insert(new.to_string(), preset);
        for preset in self.data.shortcuts.values_mut() {
            if preset == old {
                *preset = new.to_string();
            }
        }
        true
    }

    /// Bind a combo to a preset. The preset's previous combo (if any)
    /// is silently released, as is the combo's previous owner. Returns
    /// `false` when the preset does not exist.
    pub fn bind_shortcut(&mut self, combo: KeyCombo, preset: &str) -> bool {
        if !self.data.presets.contains_key(preset) {
            return false;
        }
        self.data.shortcuts.retain(|_, p| p != preset);
        self.data.shortcuts.insert(combo, preset.to_string());
        true
    }

    /// Release whatever combo is bound to a preset.
    pub fn unbind_preset(&mut self, preset: &str) {
        self.data.shortcuts.retain(|_, p| p != preset);
    }

    pub fn preset_for(&self, combo: &KeyCombo) -> Option<&str> {
        self.data.shortcuts.get(combo).map(String::as_str)
    }

    pub fn combo_for(&self, preset: &str) -> Option<&KeyCombo> {
        self.data
            .shortcuts
            .iter()
            .find(|(_, p)| p.as_str() == preset)
            .map(|(c, _)| c)
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = (&KeyCombo, &str)> {
        self.data.shortcuts.iter().map(|(c, p)| (c, p.as_str()))
    }

    pub fn popover_shortcut(&self) -> Option<&KeyCombo> {
        self.data.popover_shortcut.as_ref()
    }

    pub fn set_popover_shortcut(&mut self, combo: KeyCombo) {
        self.data.popover_shortcut = Some(combo);
    }

    pub fn clear_popover_shortcut(&mut self) {
        self.data.popover_shortcut = None;
    }
}
