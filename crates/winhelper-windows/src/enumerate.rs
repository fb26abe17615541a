use winhelper_core::HelperResult;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::window::Window;

/// Visible, unowned top-level windows, front to back.
pub fn app_windows() -> HelperResult<Vec<Window>> {
    Ok(top_level_handles()?
        .into_iter()
        .map(Window::new)
        .filter(|w| w.is_visible() && !w.has_owner())
        .collect())
}

/// Every top-level handle in z-order, unfiltered.
fn top_level_handles() -> HelperResult<Vec<HWND>> {
    let mut handles: Vec<HWND> = Vec::new();

    // SAFETY: `handles` outlives the synchronous EnumWindows call, and
    // `collect_handle` is the only reader of the pointer.
    unsafe {
        EnumWindows(
            Some(collect_handle),
            LPARAM(&mut handles as *mut Vec<HWND> as isize),
        )?;
    }

    Ok(handles)
}

unsafe extern "system" fn collect_handle(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: see `top_level_handles`.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };
    handles.push(hwnd);
    true.into()
}
