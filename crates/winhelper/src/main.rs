mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "winhelper",
    version,
    about = "Native window, display and hotkey helper for Windows host applications"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration files
    Init,
    /// List attached displays and their supported modes
    Displays {
        /// Print the device list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the resolution of a display
    SetResolution(commands::set_resolution::SetResolutionArgs),
    /// Find a window by title and optionally act on it
    Window(commands::window::WindowArgs),
    /// Relaunch this program after a delay
    Restart {
        /// Seconds to wait before relaunching
        #[arg(long, default_value_t = 3)]
        delay: u32,
    },
    /// Register hotkeys from hotkeys.toml and print every press
    Listen,
    /// Invoke an operation by name, as a host application would
    ///
    /// Each run starts with an empty device cache and no target window, so
    /// setDisplayResolution always fails with an unknown key and the
    /// show/hide/foreground operations do nothing. Use `set-resolution` and
    /// `window`, which run the lookup first within the same process.
    Call {
        /// Operation name, e.g. getDisplayDevices
        operation: String,
        /// Positional arguments; JSON literals or plain strings
        args: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        command => run(command),
    }
}

#[cfg(windows)]
fn run(command: Commands) -> ExitCode {
    let session = commands::Session::open();

    match command {
        Commands::Init => commands::init::execute(),
        Commands::Displays { json } => commands::displays::execute(&session, json),
        Commands::SetResolution(args) => commands::set_resolution::execute(&session, &args),
        Commands::Window(args) => commands::window::execute(&session, &args),
        Commands::Restart { delay } => commands::restart::execute(&session, delay),
        Commands::Listen => commands::listen::execute(&session),
        Commands::Call { operation, args } => commands::call::execute(&session, &operation, &args),
    }
}

#[cfg(not(windows))]
fn run(_command: Commands) -> ExitCode {
    eprintln!("Error: unsupported platform, this command requires Windows.");
    ExitCode::FAILURE
}
