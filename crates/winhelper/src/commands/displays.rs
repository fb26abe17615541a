use std::process::ExitCode;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use winhelper_core::DeviceFlags;

use super::Session;

pub fn execute(session: &Session, json: bool) -> ExitCode {
    let devices = session.controller.get_display_devices();

    if json {
        return match serde_json::to_string_pretty(&devices) {
            Ok(s) => {
                println!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Device"),
            Cell::new("Adapter"),
            Cell::new("Monitor"),
            Cell::new("Current mode"),
            Cell::new("Modes").set_alignment(CellAlignment::Right),
            Cell::new("Flags"),
        ]);

    for device in &devices {
        table.add_row(vec![
            Cell::new(&device.device_name),
            Cell::new(&device.friendly_name),
            Cell::new(&device.monitor.friendly_name),
            Cell::new(device.current_mode),
            Cell::new(device.available_modes.len()).set_alignment(CellAlignment::Right),
            Cell::new(describe_flags(device.flags)),
        ]);
    }

    println!("{table}");
    println!("\n{} display(s) found", devices.len());
    for device in &devices {
        println!("{}: {}", device.device_name, device.key);
    }
    println!("\nPass a key to `winhelper set-resolution` to change its mode.");
    ExitCode::SUCCESS
}

fn describe_flags(flags: DeviceFlags) -> String {
    [
        (flags.is_primary, "primary"),
        (flags.is_active, "active"),
        (flags.is_removable, "removable"),
        (flags.is_vga_compatible, "vga"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(", ")
}
