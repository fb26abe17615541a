use std::io::Write;
use std::sync::Arc;

use serde_json::{Value, json};
use winhelper_core::{Controller, EventSink, config, log};
use winhelper_windows::Win32Platform;

/// Everything a platform command needs: loaded config, logging, and a
/// controller bound to the Win32 backend.
pub struct Session {
    pub controller: Controller<Win32Platform>,
}

impl Session {
    pub fn open() -> Self {
        let config = config::load();
        log::init(&config.log);
        if !winhelper_windows::dpi::enable_dpi_awareness() {
            winhelper_core::log_debug!("dpi awareness already set for this process");
        }

        winhelper_core::log_debug!("session opened (pid {})", std::process::id());

        Self {
            controller: Controller::new(Win32Platform::new(), config.restart, Arc::new(StdoutSink)),
        }
    }
}

/// Prints each host event as one JSON line:
/// `{"event":"ON_HOT_KEY","payload":{"key":120,"modifier":3}}`.
struct StdoutSink;

impl EventSink for StdoutSink {
    fn dispatch_event(&self, name: &str, payload: &str) {
        let payload: Value =
            serde_json::from_str(payload).unwrap_or_else(|_| Value::String(payload.into()));
        let line = json!({ "event": name, "payload": payload });

        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}
