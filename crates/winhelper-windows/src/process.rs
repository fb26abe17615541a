use std::ffi::OsString;
use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use winhelper_core::HelperResult;
use windows::Win32::System::Threading::CREATE_NO_WINDOW;

/// Image name of the running executable, e.g. `app.exe`.
pub fn current_exe_name() -> HelperResult<String> {
    let exe = std::env::current_exe()?;
    exe.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| format!("{} has no file name", exe.display()).into())
}

/// Returns the command line of a running process named `exe_name`.
///
/// The current process wins when it matches; otherwise the match with the
/// lowest PID is used. Processes whose arguments cannot be read (other
/// users, protected processes) are skipped.
pub fn command_line_of(exe_name: &str) -> Option<String> {
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
    );

    let own_pid = sysinfo::get_current_pid().ok();
    let mut matches: Vec<_> = system
        .processes()
        .iter()
        .filter(|(_, p)| p.name().eq_ignore_ascii_case(exe_name) && !p.cmd().is_empty())
        .collect();
    matches.sort_by_key(|(pid, _)| (Some(**pid) != own_pid, pid.as_u32()));

    let (pid, process) = matches.first()?;
    winhelper_core::log_debug!("command line source: {exe_name} (pid {pid})");
    Some(join_args(process.cmd()))
}

/// Re-joins an argument vector using the Windows command-line quoting
/// rules understood by `CommandLineToArgvW` and the C runtime.
pub fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| quote_arg(&a.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                // Backslashes before a quote are doubled, plus one for the quote.
                quoted.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat_n('\\', backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    // Trailing backslashes would escape the closing quote.
    quoted.extend(std::iter::repeat_n('\\', backslashes * 2));
    quoted.push('"');
    quoted
}

/// Starts `program` with a raw, pre-quoted argument string and no console
/// window. The child is not waited on.
pub fn spawn_hidden(program: &str, args: &str) -> HelperResult<()> {
    let child = Command::new(program)
        .raw_arg(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(CREATE_NO_WINDOW.0)
        .spawn()?;

    winhelper_core::log_debug!("spawned {program} (pid {})", child.id());
    Ok(())
}
