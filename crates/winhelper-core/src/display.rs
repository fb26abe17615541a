//! Display adapters, monitors and video modes.
//!
//! The enumerator walks adapters through a [`DisplayBackend`] and rebuilds
//! the device cache on every call. The negotiator resolves a device through
//! that cache and performs a test-then-apply mode change.
//!
//! [`DisplayBackend`]: crate::DisplayBackend

use serde::{Deserialize, Serialize};

#[path = "display_enumerate.rs"]
mod enumerate;
#[path = "display_negotiate.rs"]
mod negotiate;

pub use enumerate::{DeviceCache, Enumeration, enumerate};
pub use negotiate::{ModeRequest, change_resolution, set_resolution};

/// A video mode: resolution, colour depth and refresh rate.
///
/// Two modes are equal when all four fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMode {
    pub width: i32,
    pub height: i32,
    pub bit_depth: i32,
    pub refresh_rate: i32,
}

impl DisplayMode {
    pub fn new(width: i32, height: i32, bit_depth: i32, refresh_rate: i32) -> Self {
        Self {
            width,
            height,
            bit_depth,
            refresh_rate,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} {}bpp @ {}Hz",
            self.width, self.height, self.bit_depth, self.refresh_rate
        )
    }
}

/// An insertion-ordered set of display modes.
///
/// Adapters report the same mode several times (once per scaling or
/// interlace variant). Only the first occurrence is kept.
#[derive(Debug, Default)]
pub struct ModeCatalog {
    modes: Vec<DisplayMode>,
}

impl ModeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `mode` unless an equal mode is already present.
    ///
    /// Returns `true` if the mode was added.
    pub fn insert(&mut self, mode: DisplayMode) -> bool {
        if self.contains(&mode) {
            return false;
        }
        self.modes.push(mode);
        true
    }

    pub fn contains(&self, mode: &DisplayMode) -> bool {
        self.modes.iter().any(|m| m == mode)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn into_modes(self) -> Vec<DisplayMode> {
        self.modes
    }
}

/// Adapter state flags as reported to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFlags {
    pub is_primary: bool,
    pub is_active: bool,
    pub is_removable: bool,
    pub is_vga_compatible: bool,
}

impl DeviceFlags {
    pub const ATTACHED_TO_DESKTOP: u32 = 0x0000_0001;
    pub const PRIMARY_DEVICE: u32 = 0x0000_0004;
    pub const VGA_COMPATIBLE: u32 = 0x0000_0010;
    pub const REMOVABLE: u32 = 0x0000_0020;

    /// Decodes the raw OS state-flag word.
    pub fn from_state(state: u32) -> Self {
        Self {
            is_primary: state & Self::PRIMARY_DEVICE != 0,
            is_active: state & Self::ATTACHED_TO_DESKTOP != 0,
            is_removable: state & Self::REMOVABLE != 0,
            is_vga_compatible: state & Self::VGA_COMPATIBLE != 0,
        }
    }
}

/// The monitor attached to an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    pub friendly_name: String,
    pub name: String,
    pub id: String,
    pub key: String,
}

/// Raw addressing information for one display adapter.
///
/// This is what the device cache keeps so that a later mode change can
/// re-query and re-address the same adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterInfo {
    /// OS device name, e.g. `\\.\DISPLAY1`.
    pub device_name: String,
    pub friendly_name: String,
    pub id: String,
    /// Opaque OS-assigned key, used as the external identity.
    pub key: String,
    pub state_flags: u32,
}

/// One enumerated display device, shaped for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDeviceRecord {
    pub key: String,
    #[serde(rename = "name")]
    pub device_name: String,
    pub friendly_name: String,
    pub id: String,
    #[serde(flatten)]
    pub flags: DeviceFlags,
    pub monitor: MonitorInfo,
    #[serde(rename = "currentDisplaySettings")]
    pub current_mode: DisplayMode,
    #[serde(rename = "availableDisplaySettings")]
    pub available_modes: Vec<DisplayMode>,
}

impl DisplayDeviceRecord {
    pub fn new(
        adapter: &AdapterInfo,
        monitor: MonitorInfo,
        current_mode: DisplayMode,
        available_modes: Vec<DisplayMode>,
    ) -> Self {
        Self {
            key: adapter.key.clone(),
            device_name: adapter.device_name.clone(),
            friendly_name: adapter.friendly_name.clone(),
            id: adapter.id.clone(),
            flags: DeviceFlags::from_state(adapter.state_flags),
            monitor,
            current_mode,
            available_modes,
        }
    }
}

/// Mode fields selected for a mode change, as OS field bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFields(pub u32);

impl ModeFields {
    pub const WIDTH: Self = Self(0x0008_0000);
    pub const HEIGHT: Self = Self(0x0010_0000);
    pub const FREQUENCY: Self = Self(0x0040_0000);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ModeFields {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ModeFields {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A requested mode and the fields of it that should take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: DisplayMode,
    pub fields: ModeFields,
}

/// Whether a mode change is only validated or actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMode {
    Test,
    Apply,
}

/// The OS result code of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChangeStatus {
    Successful,
    /// The change needs a reboot. Treated as a failure.
    Restart,
    Failed,
    BadMode,
    NotUpdated,
    BadFlags,
    BadParam,
    BadDualView,
    Other(i32),
}

impl ModeChangeStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Successful,
            1 => Self::Restart,
            -1 => Self::Failed,
            -2 => Self::BadMode,
            -3 => Self::NotUpdated,
            -4 => Self::BadFlags,
            -5 => Self::BadParam,
            -6 => Self::BadDualView,
            other => Self::Other(other),
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Successful
    }
}
