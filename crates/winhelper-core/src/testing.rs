//! In-memory platform used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::display::{ChangeMode, ModeChange, ModeChangeStatus};
use crate::hotkey::{HotkeyBinding, HotkeyCallback, HotkeyPress, Modifiers};
use crate::window::{ShowCommand, TopLevelWindow, WindowHandle};
use crate::{
    AdapterInfo, DeviceFlags, DisplayBackend, DisplayMode, EventSink, HelperResult,
    HotkeyBackend, MonitorInfo, ProcessBackend, WindowBackend,
};

pub(crate) struct FakeAdapter {
    info: AdapterInfo,
    monitor: Option<MonitorInfo>,
    current: Option<DisplayMode>,
    modes: Vec<DisplayMode>,
    fail_modes: bool,
}

impl FakeAdapter {
    pub(crate) fn new(key: &str, device_name: &str) -> Self {
        let current = DisplayMode::new(1920, 1080, 32, 60);
        Self {
            info: AdapterInfo {
                device_name: device_name.into(),
                friendly_name: "Fake Display Adapter".into(),
                id: format!("PCI\\FAKE\\{key}"),
                key: key.into(),
                state_flags: DeviceFlags::ATTACHED_TO_DESKTOP,
            },
            monitor: Some(MonitorInfo {
                friendly_name: "Generic PnP Monitor".into(),
                name: format!("{device_name}\\Monitor0"),
                id: format!("MONITOR\\FAKE\\{key}"),
                key: format!("{key}\\monitor"),
            }),
            current: Some(current),
            modes: vec![current, DisplayMode::new(1280, 720, 32, 60)],
            fail_modes: false,
        }
    }

    pub(crate) fn without_monitor(mut self) -> Self {
        self.monitor = None;
        self
    }

    pub(crate) fn without_current_mode(mut self) -> Self {
        self.current = None;
        self
    }

    pub(crate) fn with_modes(mut self, modes: Vec<DisplayMode>) -> Self {
        self.modes = modes;
        self
    }

    pub(crate) fn failing_modes(mut self) -> Self {
        self.fail_modes = true;
        self
    }
}

struct State {
    adapters: Vec<FakeAdapter>,
    monitor_queries: Vec<u32>,
    mode_changes: Vec<(ModeChange, ChangeMode)>,
    test_status: ModeChangeStatus,
    apply_status: ModeChangeStatus,
    change_error: Option<ChangeMode>,

    windows: Vec<TopLevelWindow>,
    closed: HashSet<WindowHandle>,
    host: Option<WindowHandle>,
    shown: Vec<(WindowHandle, ShowCommand)>,
    foreground: Vec<WindowHandle>,
    fail_window_scan: bool,

    next_hotkey_id: i32,
    hotkeys: Vec<HotkeyBinding>,
    refused: Vec<(u32, Modifiers)>,
    callbacks: Vec<HotkeyCallback>,

    exe_name: String,
    command_lines: HashMap<String, String>,
    spawned: Vec<(String, String)>,
    fail_spawn: bool,
}

pub(crate) struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                adapters: Vec::new(),
                monitor_queries: Vec::new(),
                mode_changes: Vec::new(),
                test_status: ModeChangeStatus::Successful,
                apply_status: ModeChangeStatus::Successful,
                change_error: None,
                windows: Vec::new(),
                closed: HashSet::new(),
                host: None,
                shown: Vec::new(),
                foreground: Vec::new(),
                fail_window_scan: false,
                next_hotkey_id: 1,
                hotkeys: Vec::new(),
                refused: Vec::new(),
                callbacks: Vec::new(),
                exe_name: "app.exe".into(),
                command_lines: HashMap::new(),
                spawned: Vec::new(),
                fail_spawn: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    // -- display --

    pub(crate) fn with_adapter(self, adapter: FakeAdapter) -> Self {
        self.state().adapters.push(adapter);
        self
    }

    pub(crate) fn without_adapter(&self, key: &str) {
        self.state().adapters.retain(|a| a.info.key != key);
    }

    pub(crate) fn with_test_status(self, status: ModeChangeStatus) -> Self {
        self.state().test_status = status;
        self
    }

    pub(crate) fn with_apply_status(self, status: ModeChangeStatus) -> Self {
        self.state().apply_status = status;
        self
    }

    /// Makes `change_mode` return `Err` for calls of the given kind.
    pub(crate) fn with_change_error(self, mode: ChangeMode) -> Self {
        self.state().change_error = Some(mode);
        self
    }

    pub(crate) fn monitor_queries(&self) -> Vec<u32> {
        self.state().monitor_queries.clone()
    }

    pub(crate) fn mode_changes(&self) -> Vec<(ModeChange, ChangeMode)> {
        self.state().mode_changes.clone()
    }

    pub(crate) fn current_mode_of(&self, key: &str) -> Option<DisplayMode> {
        self.state()
            .adapters
            .iter()
            .find(|a| a.info.key == key)
            .and_then(|a| a.current)
    }

    pub(crate) fn set_current_mode(&self, key: &str, mode: DisplayMode) {
        if let Some(a) = self.state().adapters.iter_mut().find(|a| a.info.key == key) {
            a.current = Some(mode);
        }
    }

    pub(crate) fn clear_current_mode(&self, key: &str) {
        if let Some(a) = self.state().adapters.iter_mut().find(|a| a.info.key == key) {
            a.current = None;
        }
    }

    // -- windows --

    pub(crate) fn with_window(self, handle: usize, title: &str) -> Self {
        self.state().windows.push(TopLevelWindow {
            handle: WindowHandle(handle),
            title: title.into(),
        });
        self
    }

    pub(crate) fn with_host_window(self, handle: usize) -> Self {
        self.state().host = Some(WindowHandle(handle));
        self
    }

    pub(crate) fn failing_window_scan(self) -> Self {
        self.state().fail_window_scan = true;
        self
    }

    pub(crate) fn close_window(&self, handle: usize) {
        let mut state = self.state();
        state.closed.insert(WindowHandle(handle));
        state.windows.retain(|w| w.handle != WindowHandle(handle));
    }

    pub(crate) fn shown(&self) -> Vec<(WindowHandle, ShowCommand)> {
        self.state().shown.clone()
    }

    pub(crate) fn foregrounded(&self) -> Vec<WindowHandle> {
        self.state().foreground.clone()
    }

    // -- hotkeys --

    pub(crate) fn refusing_hotkey(self, key_code: u32, modifiers: Modifiers) -> Self {
        self.state().refused.push((key_code, modifiers));
        self
    }

    pub(crate) fn attach_count(&self) -> usize {
        self.state().callbacks.len()
    }

    pub(crate) fn registered_hotkeys(&self) -> Vec<HotkeyBinding> {
        self.state().hotkeys.clone()
    }

    /// Simulates the OS delivering a press for a registered combination.
    pub(crate) fn press(&self, key_code: u32, modifiers: Modifiers) {
        let callbacks = {
            let state = self.state();
            let registered = state
                .hotkeys
                .iter()
                .any(|h| h.key_code == key_code && h.modifiers == modifiers);
            if !registered {
                return;
            }
            state.callbacks.clone()
        };
        for callback in callbacks {
            callback(HotkeyPress {
                key_code,
                modifiers,
            });
        }
    }

    // -- process --

    pub(crate) fn with_command_line(self, exe_name: &str, command_line: &str) -> Self {
        self.state()
            .command_lines
            .insert(exe_name.into(), command_line.into());
        self
    }

    pub(crate) fn failing_spawn(self) -> Self {
        self.state().fail_spawn = true;
        self
    }

    pub(crate) fn spawned(&self) -> Vec<(String, String)> {
        self.state().spawned.clone()
    }
}

impl DisplayBackend for FakePlatform {
    fn adapter(&self, index: u32) -> HelperResult<Option<AdapterInfo>> {
        Ok(self
            .state()
            .adapters
            .get(index as usize)
            .map(|a| a.info.clone()))
    }

    fn monitor(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<MonitorInfo>> {
        let mut state = self.state();
        state.monitor_queries.push(index);
        Ok(state
            .adapters
            .iter()
            .find(|a| a.info.key == adapter.key)
            .and_then(|a| a.monitor.clone()))
    }

    fn current_mode(&self, adapter: &AdapterInfo) -> HelperResult<Option<DisplayMode>> {
        Ok(self.current_mode_of(&adapter.key))
    }

    fn mode(&self, adapter: &AdapterInfo, index: u32) -> HelperResult<Option<DisplayMode>> {
        let state = self.state();
        let Some(a) = state.adapters.iter().find(|a| a.info.key == adapter.key) else {
            return Ok(None);
        };
        if a.fail_modes {
            return Err("mode query failed".into());
        }
        Ok(a.modes.get(index as usize).copied())
    }

    fn change_mode(
        &self,
        adapter: &AdapterInfo,
        change: &ModeChange,
        mode: ChangeMode,
    ) -> HelperResult<ModeChangeStatus> {
        let mut state = self.state();
        state.mode_changes.push((*change, mode));
        if state.change_error == Some(mode) {
            return Err(format!("{mode:?} rejected by driver").into());
        }
        let status = match mode {
            ChangeMode::Test => state.test_status,
            ChangeMode::Apply => state.apply_status,
        };
        if mode == ChangeMode::Apply
            && status.is_success()
            && let Some(a) = state.adapters.iter_mut().find(|a| a.info.key == adapter.key)
        {
            a.current = Some(change.mode);
        }
        Ok(status)
    }
}

impl WindowBackend for FakePlatform {
    fn top_level_windows(&self) -> HelperResult<Vec<TopLevelWindow>> {
        let state = self.state();
        if state.fail_window_scan {
            return Err("window scan failed".into());
        }
        Ok(state.windows.clone())
    }

    fn host_window(&self) -> Option<WindowHandle> {
        self.state().host
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        let state = self.state();
        !state.closed.contains(&handle)
            && (state.windows.iter().any(|w| w.handle == handle) || state.host == Some(handle))
    }

    fn show(&self, handle: WindowHandle, command: ShowCommand) {
        self.state().shown.push((handle, command));
    }

    fn set_foreground(&self, handle: WindowHandle) {
        self.state().foreground.push(handle);
    }
}

impl HotkeyBackend for FakePlatform {
    fn register(&self, key_code: u32, modifiers: Modifiers) -> HelperResult<i32> {
        let mut state = self.state();
        if state.refused.contains(&(key_code, modifiers)) {
            return Err("hot key is already registered".into());
        }
        let id = state.next_hotkey_id;
        state.next_hotkey_id += 1;
        state.hotkeys.push(HotkeyBinding {
            id,
            key_code,
            modifiers,
        });
        Ok(id)
    }

    fn unregister(&self, id: i32) -> HelperResult<()> {
        let mut state = self.state();
        let before = state.hotkeys.len();
        state.hotkeys.retain(|h| h.id != id);
        if state.hotkeys.len() == before {
            return Err(format!("hotkey {id} is not registered").into());
        }
        Ok(())
    }

    fn attach(&self, callback: HotkeyCallback) {
        self.state().callbacks.push(callback);
    }
}

impl ProcessBackend for FakePlatform {
    fn current_exe_name(&self) -> HelperResult<String> {
        Ok(self.state().exe_name.clone())
    }

    fn command_line_of(&self, exe_name: &str) -> HelperResult<Option<String>> {
        Ok(self.state().command_lines.get(exe_name).cloned())
    }

    fn spawn_hidden(&self, program: &str, args: &str) -> HelperResult<()> {
        let mut state = self.state();
        if state.fail_spawn {
            return Err("spawn failed".into());
        }
        state.spawned.push((program.into(), args.into()));
        Ok(())
    }
}

/// An [`EventSink`] that records every event.
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn dispatch_event(&self, name: &str, payload: &str) {
        self.events
            .lock()
            .unwrap()
            .push((name.into(), payload.into()));
    }
}
