use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::RestartConfig;
use crate::display::{self, DeviceCache, ModeRequest};
use crate::hotkey::HotkeyManager;
use crate::window::{self, ShowCommand, WindowHandle};
use crate::{
    DisplayDeviceRecord, EventSink, HelperResult, Modifiers, Operation, Platform, Reply,
    UnknownDeviceKey, restart,
};

/// Owns all per-session state and runs host operations against a platform.
///
/// Every operation may be called from any thread. The device cache and the
/// target window are each guarded by their own lock.
pub struct Controller<P: Platform> {
    platform: P,
    restart: RestartConfig,
    sink: Arc<dyn EventSink>,
    devices: Mutex<DeviceCache>,
    target: Mutex<Option<WindowHandle>>,
    host_window: Mutex<Option<WindowHandle>>,
    hotkeys: HotkeyManager,
}

impl<P: Platform> Controller<P> {
    pub fn new(platform: P, restart: RestartConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            platform,
            restart,
            sink,
            devices: Mutex::new(DeviceCache::new()),
            target: Mutex::new(None),
            host_window: Mutex::new(None),
            hotkeys: HotkeyManager::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Captures the host's main window handle.
    pub fn init(&self) {
        let handle = self.platform.host_window();
        match handle {
            Some(h) => crate::log_info!("init: host window {h}"),
            None => crate::log_debug!("init: process has no main window"),
        }
        *lock(&self.host_window) = handle;
    }

    /// The handle captured by [`Controller::init`].
    pub fn host_window(&self) -> Option<WindowHandle> {
        *lock(&self.host_window)
    }

    /// The window the show/hide/foreground operations act on.
    pub fn target(&self) -> Option<WindowHandle> {
        *lock(&self.target)
    }

    // -- windows --

    /// Finds the first top-level window whose title contains `substring`.
    ///
    /// On a match the window becomes the target and its full title is
    /// returned. On no match the previous target is kept.
    pub fn find_window_by_title(&self, substring: &str) -> Option<String> {
        let windows = match self.platform.top_level_windows() {
            Ok(w) => w,
            Err(e) => {
                crate::log_warn!("window scan failed: {e}");
                return None;
            }
        };

        let Some(found) = window::find_by_title(&windows, substring) else {
            crate::log_debug!("no window title contains {substring:?}");
            return None;
        };
        crate::log_debug!("target window {} \"{}\"", found.handle, found.title);
        *lock(&self.target) = Some(found.handle);
        Some(found.title.clone())
    }

    pub fn show_window(&self, maximize: bool) {
        if let Some(handle) = self.live_target() {
            self.platform.show(handle, ShowCommand::for_show(maximize));
        }
    }

    pub fn hide_window(&self) {
        if let Some(handle) = self.live_target() {
            self.platform.show(handle, ShowCommand::Hide);
        }
    }

    pub fn set_foreground_window(&self) {
        if let Some(handle) = self.live_target() {
            self.platform.set_foreground(handle);
        }
    }

    /// The target, if it still refers to an existing window.
    fn live_target(&self) -> Option<WindowHandle> {
        let handle = (*lock(&self.target))?;
        if self.platform.is_window(handle) {
            Some(handle)
        } else {
            crate::log_debug!("target window {handle} no longer exists");
            None
        }
    }

    // -- displays --

    /// Enumerates attached displays and rebuilds the device cache.
    pub fn get_display_devices(&self) -> Vec<DisplayDeviceRecord> {
        let mut cache = lock(&self.devices);
        let result = display::enumerate(&self.platform, &mut cache);
        crate::log_debug!(
            "enumerated {} display device(s), complete={}",
            result.devices.len(),
            result.complete
        );
        result.devices
    }

    /// Changes the resolution of a device from the last enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDeviceKey`](crate::UnknownDeviceKey) if `key` is
    /// not in the cache.
    pub fn set_display_resolution(
        &self,
        key: &str,
        width: i32,
        height: i32,
        refresh_rate: i32,
    ) -> HelperResult<bool> {
        let adapter = lock(&self.devices)
            .get(key)
            .cloned()
            .ok_or_else(|| UnknownDeviceKey(key.to_string()))?;

        Ok(display::change_resolution(
            &self.platform,
            &adapter,
            ModeRequest {
                width,
                height,
                refresh_rate,
            },
        ))
    }

    // -- process --

    pub fn restart_app(&self, delay_seconds: u32) -> bool {
        restart::restart(&self.platform, &self.restart, delay_seconds)
    }

    // -- hotkeys --

    pub fn register_hotkey(&self, key_code: u32, modifiers: Modifiers) -> Option<i32> {
        self.hotkeys
            .register(&self.platform, key_code, modifiers, &self.sink)
    }

    pub fn unregister_hotkey(&self, id: i32) {
        self.hotkeys.unregister(&self.platform, id);
    }

    pub fn hotkeys(&self) -> &HotkeyManager {
        &self.hotkeys
    }

    /// Runs one host operation and converts its result to a [`Reply`].
    ///
    /// # Errors
    ///
    /// Only an unknown device key in `SetDisplayResolution` fails.
    pub fn dispatch(&self, operation: Operation) -> HelperResult<Reply> {
        crate::log_debug!("dispatch {}", operation.name());

        Ok(match operation {
            Operation::Init => {
                self.init();
                Reply::None
            }
            Operation::FindWindowByTitle { substring } => self
                .find_window_by_title(&substring)
                .map_or(Reply::None, Reply::Text),
            Operation::ShowWindow { maximize } => {
                self.show_window(maximize);
                Reply::None
            }
            Operation::HideWindow => {
                self.hide_window();
                Reply::None
            }
            Operation::SetForegroundWindow => {
                self.set_foreground_window();
                Reply::None
            }
            Operation::GetDisplayDevices => Reply::Devices(self.get_display_devices()),
            Operation::SetDisplayResolution {
                key,
                width,
                height,
                refresh_rate,
            } => Reply::Bool(self.set_display_resolution(&key, width, height, refresh_rate)?),
            Operation::RestartApp { delay_seconds } => Reply::Bool(self.restart_app(delay_seconds)),
            Operation::RegisterHotKey {
                key_code,
                modifiers,
            } => Reply::Int(self.register_hotkey(key_code, modifiers).unwrap_or(0)),
            Operation::UnregisterHotKey { id } => {
                self.unregister_hotkey(id);
                Reply::None
            }
        })
    }

    /// Parses and runs a host call given by name and JSON arguments.
    pub fn call(&self, name: &str, args: &[serde_json::Value]) -> HelperResult<serde_json::Value> {
        let operation = Operation::parse(name, args)?;
        Ok(self.dispatch(operation)?.to_value())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
