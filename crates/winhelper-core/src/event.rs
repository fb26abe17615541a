use serde::{Deserialize, Serialize};

/// Receives out-of-band events for the host application.
///
/// This is the boundary to the host bridge. Implementations forward the
/// event to the host runtime; they are called from the OS message thread,
/// not from the thread that issued the operation.
pub trait EventSink: Send + Sync {
    fn dispatch_event(&self, name: &str, payload: &str);
}

/// An event pushed to the host outside of any operation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostEvent {
    /// A registered hotkey was pressed.
    HotKey { key: u32, modifier: u32 },
}

impl HostEvent {
    /// The event name the host subscribes to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HotKey { .. } => "ON_HOT_KEY",
        }
    }

    /// The JSON payload, e.g. `{"key":120,"modifier":3}`.
    pub fn payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Sends this event through `sink`.
    pub fn dispatch(&self, sink: &dyn EventSink) {
        sink.dispatch_event(self.name(), &self.payload());
    }
}
