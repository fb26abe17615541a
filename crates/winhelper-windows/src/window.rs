use winhelper_core::{ShowCommand, WindowHandle};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GW_OWNER, GetWindow, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId,
    IsWindow, IsWindowVisible, SW_HIDE, SW_RESTORE, SW_SHOWMAXIMIZED, SetForegroundWindow,
    ShowWindow,
};

/// A top-level window, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle; this struct queries the OS lazily for
/// everything else.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Rebuilds a `Window` from a handle stored by the controller.
    pub fn from_handle(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle.0 as *mut _),
        }
    }

    pub fn handle(&self) -> WindowHandle {
        WindowHandle(self.hwnd.0 as usize)
    }

    /// Returns the window title, or an empty string for untitled windows.
    pub fn title(&self) -> String {
        // SAFETY: read-only text queries; a destroyed HWND reports length 0.
        let length = unsafe { GetWindowTextLengthW(self.hwnd) };
        let Ok(length) = usize::try_from(length) else {
            return String::new();
        };
        if length == 0 {
            return String::new();
        }

        let mut buffer = vec![0u16; length + 1];
        // SAFETY: as above; the buffer has room for the terminator.
        unsafe { GetWindowTextW(self.hwnd, &mut buffer) };
        crate::wide::to_string(&buffer)
    }

    /// Whether the handle still refers to an existing window.
    pub fn exists(&self) -> bool {
        // SAFETY: IsWindow accepts any handle value.
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    pub fn is_visible(&self) -> bool {
        // SAFETY: style query, no preconditions.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    /// Whether another window owns this one (dialogs, tool palettes).
    pub fn has_owner(&self) -> bool {
        // SAFETY: GetWindow with GW_OWNER only reads the owner link.
        match unsafe { GetWindow(self.hwnd, GW_OWNER) } {
            Ok(owner) => !owner.is_invalid(),
            Err(_) => false,
        }
    }

    /// Id of the process that created this window.
    pub fn process_id(&self) -> u32 {
        let mut pid = 0u32;
        // SAFETY: GetWindowThreadProcessId writes the owning PID into `pid`.
        unsafe { GetWindowThreadProcessId(self.hwnd, Some(&mut pid)) };
        pid
    }

    pub fn show(&self, command: ShowCommand) {
        let cmd = match command {
            ShowCommand::Restore => SW_RESTORE,
            ShowCommand::Maximize => SW_SHOWMAXIMIZED,
            ShowCommand::Hide => SW_HIDE,
        };
        // SAFETY: ShowWindow with a valid HWND is safe. The return value
        // is the previous visibility, not an error.
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
    }

    /// Asks the OS to bring this window to the front and focus it.
    ///
    /// Windows may refuse when the calling process is not in the foreground;
    /// the window then only flashes in the taskbar.
    pub fn set_foreground(&self) -> bool {
        // SAFETY: a stale handle makes the call fail, nothing more.
        unsafe { SetForegroundWindow(self.hwnd).as_bool() }
    }
}
