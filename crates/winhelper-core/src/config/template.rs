/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `winhelper init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# winhelper configuration
# Location: ~/.config/winhelper/config.toml

[log]
# Enable file logging to ~/.config/winhelper/logs/winhelper.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10

[restart]
# Shell that runs the delayed restart helper.
shell = "cmd.exe"
# Host pinged once per second to wait before relaunching.
echo_host = "127.0.0.1"
"##
    .to_string()
}

/// Generates the default `hotkeys.toml` contents.
///
/// These bindings are only used by `winhelper listen`. Host applications
/// register their own hotkeys through the `registerHotKey` operation.
pub fn generate_hotkeys() -> String {
    r##"# winhelper hotkeys
# Location: ~/.config/winhelper/hotkeys.toml
#
# Each [[hotkey]] is registered globally by `winhelper listen`, which prints
# an ON_HOT_KEY event for every press.
#
# key:        a letter, digit, F1-F24, Num0-Num9, a named key (Enter, Space,
#             Left, PageUp, ...) or a raw virtual key code ("0x7B").
# modifiers:  any of "ctrl", "alt", "shift", "win".
# no_repeat:  ignore auto-repeat while the key is held (default true).

[[hotkey]]
key = "F9"
modifiers = ["ctrl", "alt"]

[[hotkey]]
key = "H"
modifiers = ["win", "shift"]
"##
    .to_string()
}
