//! Delayed self-restart through a detached helper shell.
//!
//! The helper waits by pinging a local host once per second and then
//! re-runs the command line this process was launched with. The current
//! process keeps running; the caller is expected to exit on its own.

use crate::ProcessBackend;
use crate::config::RestartConfig;

/// Builds the helper script passed to the shell after `/C`.
///
/// `ping -n N` sends N echoes one second apart, so it waits about N - 1
/// seconds. One extra echo is added to wait the full `delay_seconds`.
/// A zero delay skips the wait entirely. The bare command line is then
/// wrapped in one more pair of quotes, since `cmd /C` strips the first and
/// last quote of a payload that starts with one.
pub fn helper_script(echo_host: &str, delay_seconds: u32, command_line: &str) -> String {
    if delay_seconds == 0 {
        return format!("\"{command_line}\"");
    }
    let echoes = u64::from(delay_seconds) + 1;
    format!("ping {echo_host} -n {echoes} > nul && {command_line}")
}

/// Schedules a relaunch of the current executable after `delay_seconds`.
///
/// Returns `false` without spawning anything when no running process with
/// this executable's image name exposes a command line. Returns `true`
/// once the helper shell has been started.
pub fn restart<B: ProcessBackend + ?Sized>(
    backend: &B,
    config: &RestartConfig,
    delay_seconds: u32,
) -> bool {
    let exe_name = match backend.current_exe_name() {
        Ok(name) => name,
        Err(e) => {
            crate::log_error!("restart: cannot determine executable name: {e}");
            return false;
        }
    };

    let command_line = match backend.command_line_of(&exe_name) {
        Ok(Some(line)) if !line.trim().is_empty() => line,
        Ok(_) => {
            crate::log_warn!("restart: no command line found for {exe_name}");
            return false;
        }
        Err(e) => {
            crate::log_error!("restart: process lookup for {exe_name} failed: {e}");
            return false;
        }
    };

    let script = helper_script(&config.echo_host, delay_seconds, &command_line);
    let args = format!("/C {script}");

    match backend.spawn_hidden(&config.shell, &args) {
        Ok(()) => {
            crate::log_info!("restart scheduled in {delay_seconds}s: {command_line}");
            true
        }
        Err(e) => {
            crate::log_error!("restart: failed to spawn {}: {e}", config.shell);
            false
        }
    }
}
