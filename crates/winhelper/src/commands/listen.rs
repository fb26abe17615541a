use std::process::ExitCode;
use std::sync::mpsc;

use winhelper_core::config;

use super::Session;

/// Registers every hotkey from `hotkeys.toml` and prints an `ON_HOT_KEY`
/// line per press until Ctrl+C.
pub fn execute(session: &Session) -> ExitCode {
    let entries = config::load_hotkeys();
    if entries.is_empty() {
        eprintln!("No hotkeys configured. Run `winhelper init` and edit hotkeys.toml.");
        return ExitCode::FAILURE;
    }

    let mut registered = Vec::new();
    for entry in &entries {
        let Some((key_code, modifiers)) = entry.resolve() else {
            eprintln!("Unknown key name: {:?}", entry.key);
            continue;
        };
        match session.controller.register_hotkey(key_code, modifiers) {
            Some(id) => {
                println!("Registered {} (id {id})", label(&entry.key, modifiers));
                registered.push(id);
            }
            None => eprintln!("Could not register {}", label(&entry.key, modifiers)),
        }
    }

    if registered.is_empty() {
        eprintln!("No hotkeys could be registered.");
        return ExitCode::FAILURE;
    }

    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = winhelper_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    println!("\nListening for hotkeys (press Ctrl+C to stop)...\n");
    let _ = stop_rx.recv();

    for id in registered {
        session.controller.unregister_hotkey(id);
    }
    ExitCode::SUCCESS
}

fn label(key: &str, modifiers: winhelper_core::Modifiers) -> String {
    let mods = modifiers.describe();
    if mods.is_empty() {
        key.to_string()
    } else {
        format!("{mods}+{key}")
    }
}
