pub mod hotkeys;
mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use hotkeys::{HotkeyEntry, Modifier};
pub use loader::{config_dir, config_path, hotkeys_path, load, load_hotkeys};

/// Top-level configuration for winhelper.
///
/// Loaded from `~/.config/winhelper/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging.
    pub log: LogConfig,
    /// Delayed self-restart helper.
    pub restart: RestartConfig,
}

/// Settings for the helper process that performs a delayed restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Shell used to run the helper script.
    pub shell: String,
    /// Host pinged once per second as a sleep surrogate.
    pub echo_host: String,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            shell: "cmd.exe".into(),
            echo_host: "127.0.0.1".into(),
        }
    }
}

impl Config {
    /// Clamps values to safe ranges and replaces blank strings with
    /// their defaults.
    pub fn validate(&mut self) {
        self.log.max_file_mb = self.log.max_file_mb.clamp(1, 1024);

        let defaults = RestartConfig::default();
        if self.restart.shell.trim().is_empty() {
            self.restart.shell = defaults.shell;
        }
        if self.restart.echo_host.trim().is_empty() {
            self.restart.echo_host = defaults.echo_host;
        }
    }
}

/// Wrapper for deserializing the hotkeys file.
///
/// The file contains a top-level `[[hotkey]]` array of tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct HotkeysFile {
    #[serde(default)]
    pub(crate) hotkey: Vec<HotkeyEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert!(!config.log.enabled);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.restart.shell, "cmd.exe");
        assert_eq!(config.restart.echo_host, "127.0.0.1");
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[log]\nenabled = true\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert!(config.log.enabled);
        assert_eq!(config.log.max_file_mb, 10);
        assert_eq!(config.restart, RestartConfig::default());
    }

    #[test]
    fn validate_clamps_and_fills_blanks() {
        // Arrange
        let mut config = Config {
            log: LogConfig {
                max_file_mb: 0,
                ..Default::default()
            },
            restart: RestartConfig {
                shell: "  ".into(),
                echo_host: "localhost".into(),
            },
        };

        // Act
        config.validate();

        // Assert
        assert_eq!(config.log.max_file_mb, 1);
        assert_eq!(config.restart.shell, "cmd.exe");
        assert_eq!(config.restart.echo_host, "localhost");
    }

    #[test]
    fn generated_config_template_parses() {
        // Act
        let config: Config = toml::from_str(&template::generate_config()).unwrap();

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn generated_hotkeys_template_parses() {
        // Act
        let file: HotkeysFile = toml::from_str(&template::generate_hotkeys()).unwrap();

        // Assert
        assert!(!file.hotkey.is_empty());
        assert!(file.hotkey.iter().all(|h| h.resolve().is_some()));
    }
}
