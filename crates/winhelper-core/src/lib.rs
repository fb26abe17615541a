pub mod backend;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod event;
pub mod hotkey;
pub mod keys;
pub mod log;
pub mod operation;
pub mod restart;
pub mod window;

#[cfg(test)]
mod testing;

pub use backend::{DisplayBackend, HotkeyBackend, Platform, ProcessBackend, WindowBackend};
pub use controller::Controller;
pub use display::{
    AdapterInfo, DeviceFlags, DisplayDeviceRecord, DisplayMode, Enumeration, ModeCatalog,
    MonitorInfo,
};
pub use error::{ArgumentError, HelperResult, UnknownDeviceKey};
pub use event::{EventSink, HostEvent};
pub use hotkey::{HotkeyBinding, HotkeyPress, Modifiers};
pub use operation::{Operation, Reply};
pub use window::{ShowCommand, WindowHandle};
