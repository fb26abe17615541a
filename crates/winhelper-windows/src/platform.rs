use winhelper_core::display::{ChangeMode, ModeChange, ModeChangeStatus};
use winhelper_core::hotkey::HotkeyCallback;
use winhelper_core::window::TopLevelWindow;
use winhelper_core::{
    AdapterInfo, DisplayBackend, DisplayMode, HelperResult, HotkeyBackend, Modifiers, MonitorInfo,
    ProcessBackend, ShowCommand, WindowBackend, WindowHandle,
};

use crate::enumerate::app_windows;
use crate::hotkey::HotkeyHost;
use crate::window::Window;
use crate::{display, process};

/// The Win32 implementation of every platform trait.
#[derive(Default)]
pub struct Win32Platform {
    hotkeys: HotkeyHost,
}

impl Win32Platform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayBackend for Win32Platform {
    fn adapter(&self, index: u32) -> HelperResult<Option<AdapterInfo>> {
        Ok(display::adapter(index))
    }

    fn monitor(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<MonitorInfo>> {
        Ok(display::monitor(adapter, index))
    }

    fn current_mode(&self, adapter: &AdapterInfo) -> HelperResult<Option<DisplayMode>> {
        Ok(display::current_mode(adapter))
    }

    fn mode(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<DisplayMode>> {
        Ok(display::mode(adapter, index))
    }

    fn change_mode(
        &self,
        adapter: &AdapterInfo,
        change: &ModeChange,
        mode: ChangeMode,
    ) -> HelperResult<ModeChangeStatus> {
        display::change_mode(adapter, change, mode)
    }
}

impl WindowBackend for Win32Platform {
    fn top_level_windows(&self) -> HelperResult<Vec<TopLevelWindow>> {
        Ok(app_windows()?
            .into_iter()
            .map(|w| TopLevelWindow {
                handle: w.handle(),
                title: w.title(),
            })
            .collect())
    }

    /// The first visible, unowned, titled window of this process.
    fn host_window(&self) -> Option<WindowHandle> {
        let pid = std::process::id();
        app_windows()
            .ok()?
            .into_iter()
            .find(|w| w.process_id() == pid && !w.title().is_empty())
            .map(|w| w.handle())
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        Window::from_handle(handle).exists()
    }

    fn show(&self, handle: WindowHandle, command: ShowCommand) {
        Window::from_handle(handle).show(command);
    }

    fn set_foreground(&self, handle: WindowHandle) {
        if !Window::from_handle(handle).set_foreground() {
            winhelper_core::log_debug!("foreground request for {handle} was refused");
        }
    }
}

impl HotkeyBackend for Win32Platform {
    fn register(&self, key_code: u32, modifiers: Modifiers) -> HelperResult<i32> {
        self.hotkeys.register(key_code, modifiers)
    }

    fn unregister(&self, id: i32) -> HelperResult<()> {
        self.hotkeys.unregister(id)
    }

    fn attach(&self, callback: HotkeyCallback) {
        self.hotkeys.attach(callback);
    }
}

impl ProcessBackend for Win32Platform {
    fn current_exe_name(&self) -> HelperResult<String> {
        process::current_exe_name()
    }

    fn command_line_of(&self, exe_name: &str) -> HelperResult<Option<String>> {
        Ok(process::command_line_of(exe_name))
    }

    fn spawn_hidden(&self, program: &str, args: &str) -> HelperResult<()> {
        process::spawn_hidden(program, args)
    }
}
