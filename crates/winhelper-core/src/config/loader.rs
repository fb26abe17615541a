use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Config, HotkeyEntry, HotkeysFile};

/// Returns the config directory: `~/.config/winhelper/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("winhelper"))
}

/// Returns the config file path: `~/.config/winhelper/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the hotkeys file path: `~/.config/winhelper/hotkeys.toml`.
pub fn hotkeys_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("hotkeys.toml"))
}

/// Why a config file could not be loaded.
#[derive(Debug)]
enum LoadError {
    NotFound,
    Other(String),
}

/// Reads and parses a TOML file.
fn read_toml<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> Result<T, LoadError> {
    let path = path.ok_or_else(|| LoadError::Other("could not determine config path".into()))?;
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Other(format!("{}: {e}", path.display())),
    })?;
    toml::from_str(&content).map_err(|e| LoadError::Other(format!("{}: {e}", path.display())))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
pub fn load() -> Config {
    let mut config = load_or_default(read_toml(config_path().as_deref()), Config::default);
    config.validate();
    config
}

/// Loads hotkeys from `~/.config/winhelper/hotkeys.toml`.
///
/// Returns an empty list if the file is missing or invalid.
pub fn load_hotkeys() -> Vec<HotkeyEntry> {
    load_or_default(
        read_toml::<HotkeysFile>(hotkeys_path().as_deref()).map(|f| f.hotkey),
        Vec::new,
    )
}

/// Unwraps a load result, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are reported.
fn load_or_default<T>(result: Result<T, LoadError>, default: impl Fn() -> T) -> T {
    match result {
        Ok(val) => val,
        Err(LoadError::NotFound) => default(),
        Err(LoadError::Other(e)) => {
            eprintln!("Warning: {e}");
            crate::log_warn!("config: {e}");
            default()
        }
    }
}
