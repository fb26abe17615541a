use serde::{Deserialize, Serialize};

/// An opaque OS window handle.
///
/// Stored as a pointer-sized integer so callers do not depend on the
/// platform crate's handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub usize);

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// A top-level window together with its title at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelWindow {
    pub handle: WindowHandle,
    pub title: String,
}

/// How a located window should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    /// Restore to its normal size and position.
    Restore,
    Maximize,
    Hide,
}

impl ShowCommand {
    pub fn for_show(maximize: bool) -> Self {
        if maximize { Self::Maximize } else { Self::Restore }
    }
}

/// Returns the first window whose title contains `needle`.
///
/// Matching is case-sensitive. Untitled windows never match, not even an
/// empty needle.
pub fn find_by_title<'a>(windows: &'a [TopLevelWindow], needle: &str) -> Option<&'a TopLevelWindow> {
    windows
        .iter()
        .find(|w| !w.title.is_empty() && w.title.contains(needle))
}
