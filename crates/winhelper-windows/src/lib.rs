//! Win32 implementation of the winhelper platform traits.
//!
//! Everything here is Windows-only; on other targets the crate is empty.
#![cfg(windows)]

/// Ctrl+C handling for the CLI's blocking commands.
pub mod ctrl_c;

/// Display adapters, monitors and video modes.
pub mod display;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Top-level window enumeration.
pub mod enumerate;

/// Global hotkeys on a dedicated message thread.
pub mod hotkey;

/// The `Platform` implementation tying the modules together.
pub mod platform;

/// Process table lookup and hidden helper spawning.
pub mod process;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

mod wide;

pub use platform::Win32Platform;
pub use window::Window;
