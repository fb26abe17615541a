use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{EventSink, HostEvent, HotkeyBackend};

/// Raw hotkey modifier mask, passed to the OS unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers(pub u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const ALT: Self = Self(0x0001);
    pub const CONTROL: Self = Self(0x0002);
    pub const SHIFT: Self = Self(0x0004);
    pub const WIN: Self = Self(0x0008);
    /// Suppresses auto-repeat. Never reported back in a press.
    pub const NOREPEAT: Self = Self(0x4000);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the mask without [`Modifiers::NOREPEAT`].
    pub fn without_norepeat(self) -> Self {
        Self(self.0 & !Self::NOREPEAT.0)
    }

    /// Human-readable form, e.g. `Ctrl+Alt`.
    pub fn describe(self) -> String {
        let names = [
            (Self::CONTROL, "Ctrl"),
            (Self::ALT, "Alt"),
            (Self::SHIFT, "Shift"),
            (Self::WIN, "Win"),
        ];
        names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A key press delivered by the OS for some registered hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyPress {
    pub key_code: u32,
    pub modifiers: Modifiers,
}

/// A live hotkey registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub id: i32,
    pub key_code: u32,
    pub modifiers: Modifiers,
}

/// The single callback that receives every hotkey press.
pub type HotkeyCallback = Arc<dyn Fn(HotkeyPress) + Send + Sync>;

/// Tracks hotkey registrations and the one-time dispatcher attachment.
///
/// All registered hotkeys share one dispatch callback. Presses are routed
/// by the key and modifier values the OS reports, not by binding id.
#[derive(Debug, Default)]
pub struct HotkeyManager {
    attached: AtomicBool,
    bindings: Mutex<Vec<HotkeyBinding>>,
}

impl HotkeyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hotkey with the backend.
    ///
    /// On the first successful registration the dispatcher is attached to
    /// the backend. Returns `None` if the OS refused the combination.
    pub fn register<B: HotkeyBackend + ?Sized>(
        &self,
        backend: &B,
        key_code: u32,
        modifiers: Modifiers,
        sink: &Arc<dyn EventSink>,
    ) -> Option<i32> {
        let id = match backend.register(key_code, modifiers) {
            Ok(id) => id,
            Err(e) => {
                crate::log_warn!(
                    "hotkey vk=0x{key_code:02X} mods=0x{:X} refused: {e}",
                    modifiers.bits()
                );
                return None;
            }
        };

        self.lock().push(HotkeyBinding {
            id,
            key_code,
            modifiers,
        });
        crate::log_info!(
            "registered hotkey {id} (vk=0x{key_code:02X} mods=0x{:X})",
            modifiers.bits()
        );

        if self
            .attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            backend.attach(dispatcher(Arc::clone(sink)));
            crate::log_info!("hotkey dispatcher attached");
        }

        Some(id)
    }

    /// Removes a registration. The dispatcher stays attached.
    pub fn unregister<B: HotkeyBackend + ?Sized>(&self, backend: &B, id: i32) {
        if let Err(e) = backend.unregister(id) {
            crate::log_warn!("failed to unregister hotkey {id}: {e}");
        }
        self.lock().retain(|b| b.id != id);
    }

    /// Whether the dispatcher has been attached.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Snapshot of the live registrations.
    pub fn bindings(&self) -> Vec<HotkeyBinding> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HotkeyBinding>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the callback that turns presses into host events.
fn dispatcher(sink: Arc<dyn EventSink>) -> HotkeyCallback {
    Arc::new(move |press: HotkeyPress| {
        HostEvent::HotKey {
            key: press.key_code,
            modifier: press.modifiers.without_norepeat().bits(),
        }
        .dispatch(sink.as_ref());
    })
}
