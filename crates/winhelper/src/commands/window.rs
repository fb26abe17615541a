use clap::Args;

/// Arguments for the `window` subcommand.
#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
#[command(group = clap::ArgGroup::new("action").multiple(false))]
pub struct WindowArgs {
    /// Case-sensitive substring of the window title
    title: String,
    /// Restore the window to its normal size
    #[arg(long, group = "action")]
    show: bool,
    /// Show the window maximized
    #[arg(long, group = "action")]
    maximize: bool,
    /// Hide the window
    #[arg(long, group = "action")]
    hide: bool,
    /// Bring the window to the foreground
    #[arg(long, group = "action")]
    foreground: bool,
}

#[cfg(windows)]
pub fn execute(session: &super::Session, args: &WindowArgs) -> std::process::ExitCode {
    use std::process::ExitCode;

    let controller = &session.controller;
    let Some(title) = controller.find_window_by_title(&args.title) else {
        eprintln!("No window title contains {:?}.", args.title);
        return ExitCode::FAILURE;
    };

    let handle = controller
        .target()
        .map(|h| h.to_string())
        .unwrap_or_default();
    println!("{handle} \"{title}\"");

    if args.show || args.maximize {
        controller.show_window(args.maximize);
    } else if args.hide {
        controller.hide_window();
    } else if args.foreground {
        controller.set_foreground_window();
    }
    ExitCode::SUCCESS
}
