use std::process::ExitCode;

use winhelper_core::config;

/// Creates the default configuration files at `~/.config/winhelper/`.
///
/// Generates `config.toml` and `hotkeys.toml` with comments explaining
/// every option. Existing files are not overwritten.
pub fn execute() -> ExitCode {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        return ExitCode::FAILURE;
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        return ExitCode::FAILURE;
    }

    let written = [
        write_if_missing(&dir.join("config.toml"), &config::template::generate_config()),
        write_if_missing(
            &dir.join("hotkeys.toml"),
            &config::template::generate_hotkeys(),
        ),
    ];

    println!("\nEdit config.toml for logging and restart settings.");
    println!("hotkeys.toml lists the bindings registered by `winhelper listen`.");

    if written.iter().all(|ok| *ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Writes content to a file only if it doesn't already exist.
///
/// Returns `false` only when the write itself failed.
fn write_if_missing(path: &std::path::Path, content: &str) -> bool {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return true;
    }

    match std::fs::write(path, content) {
        Ok(()) => {
            println!("Created {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            false
        }
    }
}
