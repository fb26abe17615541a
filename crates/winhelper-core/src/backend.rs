//! Platform traits.
//!
//! Each platform crate (e.g. `winhelper-windows`) implements these against
//! its native APIs. The controller only talks to the OS through them, which
//! keeps all sequencing and caching logic platform-agnostic.

use crate::display::{ChangeMode, ModeChange, ModeChangeStatus};
use crate::hotkey::{HotkeyCallback, Modifiers};
use crate::window::{ShowCommand, TopLevelWindow, WindowHandle};
use crate::{AdapterInfo, DisplayMode, HelperResult, MonitorInfo};

/// Display adapter and video mode queries.
///
/// Query methods return `Ok(None)` when the OS signals "no such entry"
/// (end of enumeration, no monitor attached, mode unavailable). `Err` is
/// reserved for unexpected failures.
pub trait DisplayBackend {
    /// Returns the adapter at `index`, or `None` past the last adapter.
    fn adapter(&self, index: u32) -> HelperResult<Option<AdapterInfo>>;

    /// Returns the monitor attached to `adapter` at `index`.
    fn monitor(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<MonitorInfo>>;

    /// Returns the mode the adapter is currently driven at.
    fn current_mode(&self, adapter: &AdapterInfo) -> HelperResult<Option<DisplayMode>>;

    /// Returns the supported mode at `index`, or `None` past the last mode.
    fn mode(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<DisplayMode>>;

    /// Validates or applies a mode change and returns the OS status.
    fn change_mode(
        &self,
        adapter: &AdapterInfo,
        change: &ModeChange,
        mode: ChangeMode,
    ) -> HelperResult<ModeChangeStatus>;
}

/// Top-level window queries and control.
pub trait WindowBackend {
    /// Lists top-level application windows in OS order.
    fn top_level_windows(&self) -> HelperResult<Vec<TopLevelWindow>>;

    /// Returns the main window of the current process, if it has one.
    fn host_window(&self) -> Option<WindowHandle>;

    /// Returns whether `handle` still refers to an existing window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    fn show(&self, handle: WindowHandle, command: ShowCommand);

    fn set_foreground(&self, handle: WindowHandle);
}

/// Global hotkey registration.
pub trait HotkeyBackend {
    /// Registers a global hotkey and returns its id.
    ///
    /// Returns an error if the OS refuses the combination (for example
    /// because another process already owns it).
    fn register(&self, key_code: u32, modifiers: Modifiers) -> HelperResult<i32>;

    fn unregister(&self, id: i32) -> HelperResult<()>;

    /// Installs the callback that receives every hotkey press.
    ///
    /// Called at most once per controller.
    fn attach(&self, callback: HotkeyCallback);
}

/// Process table access and helper spawning.
pub trait ProcessBackend {
    /// Image name of the running executable, e.g. `app.exe`.
    fn current_exe_name(&self) -> HelperResult<String>;

    /// Command line of the first running process with this image name.
    fn command_line_of(&self, exe_name: &str) -> HelperResult<Option<String>>;

    /// Starts `program` with `args` in a hidden, windowless process.
    fn spawn_hidden(&self, program: &str, args: &str) -> HelperResult<()>;
}

/// Everything a [`Controller`](crate::Controller) needs from the OS.
pub trait Platform: DisplayBackend + WindowBackend + HotkeyBackend + ProcessBackend {}

impl<T> Platform for T where T: DisplayBackend + WindowBackend + HotkeyBackend + ProcessBackend {}
