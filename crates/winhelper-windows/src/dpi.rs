use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

/// Opts the process into per-monitor (v2) DPI awareness so display modes
/// and window rectangles are reported in physical pixels.
///
/// Returns `false` when awareness was already fixed, e.g. by an
/// application manifest. Call before the first display query.
pub fn enable_dpi_awareness() -> bool {
    // SAFETY: no preconditions; a second call fails without side effects.
    unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() }
}
