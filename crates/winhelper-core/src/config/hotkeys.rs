use serde::{Deserialize, Serialize};

use crate::hotkey::Modifiers;
use crate::keys;

/// A hotkey from `hotkeys.toml`, registered by `winhelper listen`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyEntry {
    /// Key name (e.g. "J", "F9", "Space") or raw hex code ("0x7B").
    pub key: String,
    /// Modifier keys (e.g. ["ctrl", "alt"]).
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Suppress auto-repeat while the key is held.
    #[serde(default = "default_no_repeat")]
    pub no_repeat: bool,
}

fn default_no_repeat() -> bool {
    true
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl From<Modifier> for Modifiers {
    fn from(modifier: Modifier) -> Self {
        match modifier {
            Modifier::Alt => Modifiers::ALT,
            Modifier::Shift => Modifiers::SHIFT,
            Modifier::Ctrl => Modifiers::CONTROL,
            Modifier::Win => Modifiers::WIN,
        }
    }
}

impl HotkeyEntry {
    /// Resolves the key name and modifiers to raw codes.
    ///
    /// Returns `None` for an unknown key name.
    pub fn resolve(&self) -> Option<(u32, Modifiers)> {
        let vk = keys::vk_from_name(&self.key)?;

        let mut modifiers = if self.no_repeat {
            Modifiers::NOREPEAT
        } else {
            Modifiers::NONE
        };
        for m in &self.modifiers {
            modifiers |= Modifiers::from(*m);
        }

        Some((vk, modifiers))
    }
}
