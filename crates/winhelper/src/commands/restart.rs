use std::process::ExitCode;

use super::Session;

/// Set for the helper shell and inherited by the relaunched process, so
/// the relaunched `winhelper restart` does not schedule another one.
const RELAUNCH_MARKER: &str = "WINHELPER_RELAUNCHED";

pub fn execute(session: &Session, delay: u32) -> ExitCode {
    if std::env::var_os(RELAUNCH_MARKER).is_some() {
        winhelper_core::log_info!("relaunched by a previous restart");
        println!("Relaunched.");
        return ExitCode::SUCCESS;
    }

    // SAFETY: no other thread has been started yet, so nothing can read
    // the environment concurrently.
    unsafe { std::env::set_var(RELAUNCH_MARKER, "1") };

    if session.controller.restart_app(delay) {
        println!("Relaunching in {delay}s.");
        ExitCode::SUCCESS
    } else {
        eprintln!("Error: could not schedule a restart (see log for details).");
        ExitCode::FAILURE
    }
}
