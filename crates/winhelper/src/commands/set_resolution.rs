use clap::Args;

/// Arguments for the `set-resolution` subcommand.
#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
pub struct SetResolutionArgs {
    /// Device key, as printed by `winhelper displays`
    key: String,
    /// Width in pixels
    width: i32,
    /// Height in pixels
    height: i32,
    /// Refresh rate in Hz; 0 keeps the current rate
    #[arg(long, default_value_t = 0)]
    refresh: i32,
}

#[cfg(windows)]
pub fn execute(session: &super::Session, args: &SetResolutionArgs) -> std::process::ExitCode {
    use std::process::ExitCode;

    // Keys are only resolvable after an enumeration in this session.
    session.controller.get_display_devices();

    match session.controller.set_display_resolution(
        &args.key,
        args.width,
        args.height,
        args.refresh,
    ) {
        Ok(true) => {
            println!("Resolution changed to {}x{}.", args.width, args.height);
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!(
                "The display rejected {}x{} (refresh {}).",
                args.width, args.height, args.refresh
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
