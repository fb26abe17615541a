use std::mem;

use winhelper_core::display::{ChangeMode, ModeChange, ModeChangeStatus};
use winhelper_core::{AdapterInfo, DisplayMode, HelperResult, MonitorInfo};
use windows::Win32::Graphics::Gdi::{
    CDS_TEST, CDS_TYPE, ChangeDisplaySettingsExW, DEVMODE_FIELD_FLAGS, DEVMODEW, DISPLAY_DEVICEW,
    ENUM_CURRENT_SETTINGS, ENUM_DISPLAY_SETTINGS_MODE, EnumDisplayDevicesW, EnumDisplaySettingsW,
};
use windows::core::PCWSTR;

use crate::wide;

/// Returns the display adapter at `index`.
///
/// `EnumDisplayDevicesW` fails past the last adapter, which is reported as
/// `None` rather than an error.
pub fn adapter(index: u32) -> Option<AdapterInfo> {
    let dd = query_device(None, index)?;
    Some(AdapterInfo {
        device_name: wide::to_string(&dd.DeviceName),
        friendly_name: wide::to_string(&dd.DeviceString),
        id: wide::to_string(&dd.DeviceID),
        key: wide::to_string(&dd.DeviceKey),
        state_flags: dd.StateFlags.0,
    })
}

/// Returns the monitor attached to `adapter` at `index`.
pub fn monitor(adapter: &AdapterInfo, index: u32) -> Option<MonitorInfo> {
    let dd = query_device(Some(&adapter.device_name), index)?;
    Some(MonitorInfo {
        friendly_name: wide::to_string(&dd.DeviceString),
        name: wide::to_string(&dd.DeviceName),
        id: wide::to_string(&dd.DeviceID),
        key: wide::to_string(&dd.DeviceKey),
    })
}

fn query_device(parent: Option<&str>, index: u32) -> Option<DISPLAY_DEVICEW> {
    let mut dd = DISPLAY_DEVICEW {
        cb: mem::size_of::<DISPLAY_DEVICEW>() as u32,
        ..Default::default()
    };
    let parent = parent.map(wide::null_terminated);
    let name = parent
        .as_ref()
        .map_or(PCWSTR::null(), |p| PCWSTR(p.as_ptr()));

    // SAFETY: `dd.cb` is set as the API requires and `name` (when not
    // null) points into `parent`, which outlives the call.
    let found = unsafe { EnumDisplayDevicesW(name, index, &mut dd, 0) };
    found.as_bool().then_some(dd)
}

/// Returns the mode `adapter` is currently driven at.
pub fn current_mode(adapter: &AdapterInfo) -> Option<DisplayMode> {
    query_mode(&adapter.device_name, ENUM_CURRENT_SETTINGS).map(|dm| to_mode(&dm))
}

/// Returns the supported mode at `index`, or `None` past the last one.
pub fn mode(adapter: &AdapterInfo, index: u32) -> Option<DisplayMode> {
    query_mode(&adapter.device_name, ENUM_DISPLAY_SETTINGS_MODE(index)).map(|dm| to_mode(&dm))
}

fn query_mode(device_name: &str, which: ENUM_DISPLAY_SETTINGS_MODE) -> Option<DEVMODEW> {
    let name = wide::null_terminated(device_name);
    let mut dm = DEVMODEW {
        dmSize: mem::size_of::<DEVMODEW>() as u16,
        ..Default::default()
    };

    // SAFETY: `dm.dmSize` is set and `name` is a null-terminated UTF-16
    // buffer that outlives the call.
    let found = unsafe { EnumDisplaySettingsW(PCWSTR(name.as_ptr()), which, &mut dm) };
    found.as_bool().then_some(dm)
}

fn to_mode(dm: &DEVMODEW) -> DisplayMode {
    DisplayMode::new(
        dm.dmPelsWidth as i32,
        dm.dmPelsHeight as i32,
        dm.dmBitsPerPel as i32,
        dm.dmDisplayFrequency as i32,
    )
}

/// Validates or applies a mode change on `adapter`'s own device.
///
/// The change is never written to the registry, so an applied mode lasts
/// until the next reboot or mode change.
pub fn change_mode(
    adapter: &AdapterInfo,
    change: &ModeChange,
    mode: ChangeMode,
) -> HelperResult<ModeChangeStatus> {
    let name = wide::null_terminated(&adapter.device_name);
    let mut dm = DEVMODEW {
        dmSize: mem::size_of::<DEVMODEW>() as u16,
        ..Default::default()
    };
    let (Ok(width), Ok(height), Ok(frequency)) = (
        u32::try_from(change.mode.width),
        u32::try_from(change.mode.height),
        u32::try_from(change.mode.refresh_rate),
    ) else {
        return Ok(ModeChangeStatus::BadParam);
    };
    dm.dmPelsWidth = width;
    dm.dmPelsHeight = height;
    dm.dmDisplayFrequency = frequency;
    dm.dmFields = DEVMODE_FIELD_FLAGS(change.fields.0);

    let flags = match mode {
        ChangeMode::Test => CDS_TEST,
        ChangeMode::Apply => CDS_TYPE(0),
    };

    // SAFETY: `name` and `dm` are valid for the duration of the call, and
    // `dm.dmFields` only names fields that were filled in above.
    let status = unsafe {
        ChangeDisplaySettingsExW(PCWSTR(name.as_ptr()), Some(&dm), None, flags, None)
    };

    winhelper_core::log_debug!(
        "ChangeDisplaySettingsExW({}, {}, {mode:?}) = {}",
        adapter.device_name,
        change.mode,
        status.0
    );
    Ok(ModeChangeStatus::from_code(status.0))
}
