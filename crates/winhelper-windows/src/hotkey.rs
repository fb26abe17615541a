//! Global hotkeys on a dedicated message thread.
//!
//! `RegisterHotKey(None, ..)` binds the hotkey to the calling thread's
//! message queue, so registration and `WM_HOTKEY` delivery must happen on
//! the same thread. Callers post requests over a channel and wake the
//! thread with `WM_APP`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread;

use winhelper_core::hotkey::HotkeyCallback;
use winhelper_core::{HelperResult, HotkeyPress, Modifiers};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW,
    TranslateMessage, WM_APP, WM_HOTKEY, WM_QUIT,
};

/// Wakes the hotkey thread to drain its request channel.
const WM_HOTKEY_REQUEST: u32 = WM_APP + 1;

/// Highest id `RegisterHotKey` accepts from an application.
const MAX_HOTKEY_ID: i32 = 0xBFFF;

enum Request {
    Register {
        key_code: u32,
        modifiers: Modifiers,
        reply: Sender<Result<i32, String>>,
    },
    Unregister {
        id: i32,
        reply: Sender<Result<(), String>>,
    },
}

/// Owns the hotkey thread, started on first registration.
pub struct HotkeyHost {
    callback: Arc<OnceLock<HotkeyCallback>>,
    thread: Mutex<Option<HotkeyThread>>,
}

impl HotkeyHost {
    pub fn new() -> Self {
        Self {
            callback: Arc::new(OnceLock::new()),
            thread: Mutex::new(None),
        }
    }

    pub fn register(&self, key_code: u32, modifiers: Modifiers) -> HelperResult<i32> {
        self.request(|reply| Request::Register {
            key_code,
            modifiers,
            reply,
        })
    }

    pub fn unregister(&self, id: i32) -> HelperResult<()> {
        self.request(|reply| Request::Unregister { id, reply })
    }

    /// Installs the press callback. Later calls are ignored.
    pub fn attach(&self, callback: HotkeyCallback) {
        if self.callback.set(callback).is_err() {
            winhelper_core::log_warn!("hotkey callback already attached");
        }
    }

    fn request<T>(
        &self,
        build: impl FnOnce(Sender<Result<T, String>>) -> Request,
    ) -> HelperResult<T> {
        let (reply_tx, reply_rx) = mpsc::channel();
        {
            let mut guard = self.thread.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.is_none() {
                *guard = Some(HotkeyThread::start(Arc::clone(&self.callback))?);
            }
            let Some(thread) = guard.as_ref() else {
                return Err("hotkey thread is not running".into());
            };
            thread.send(build(reply_tx))?;
        }

        reply_rx
            .recv()
            .map_err(|_| "hotkey thread exited unexpectedly")?
            .map_err(Into::into)
    }
}

impl Default for HotkeyHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HotkeyHost {
    fn drop(&mut self) {
        let thread = self
            .thread
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(thread) = thread {
            thread.stop();
        }
    }
}

struct HotkeyThread {
    thread_id: u32,
    requests: Sender<Request>,
    handle: thread::JoinHandle<()>,
}

impl HotkeyThread {
    fn start(callback: Arc<OnceLock<HotkeyCallback>>) -> HelperResult<Self> {
        let (ready_tx, ready_rx) = mpsc::channel::<u32>();
        let (requests, requests_rx) = mpsc::channel::<Request>();

        let handle = thread::Builder::new()
            .name("winhelper-hotkeys".into())
            .spawn(move || {
                // SAFETY: PeekMessageW with PM_NOREMOVE only forces the
                // thread's message queue into existence, so that posted
                // wake-ups sent right after the handshake are not lost.
                unsafe {
                    let mut msg = MSG::default();
                    let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
                }
                let thread_id = unsafe { GetCurrentThreadId() };
                let _ = ready_tx.send(thread_id);

                run_message_pump(&requests_rx, &callback);
            })?;

        let thread_id = ready_rx
            .recv()
            .map_err(|_| "hotkey thread exited unexpectedly")?;
        winhelper_core::log_debug!("hotkey thread started (tid={thread_id})");

        Ok(Self {
            thread_id,
            requests,
            handle,
        })
    }

    fn send(&self, request: Request) -> HelperResult<()> {
        self.requests
            .send(request)
            .map_err(|_| "hotkey thread exited unexpectedly")?;
        // SAFETY: PostThreadMessageW only enqueues a message on a thread
        // whose queue was created before the start handshake.
        unsafe { PostThreadMessageW(self.thread_id, WM_HOTKEY_REQUEST, WPARAM(0), LPARAM(0))? };
        Ok(())
    }

    /// Signals the thread to stop and waits for it to finish.
    fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// The Win32 message pump. Blocks until `WM_QUIT` is received, then
/// releases every hotkey still registered on this thread.
fn run_message_pump(requests: &Receiver<Request>, callback: &OnceLock<HotkeyCallback>) {
    let mut registry = Registry::default();
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        match msg.message {
            WM_HOTKEY => {
                if let Some(callback) = callback.get() {
                    callback(decode_press(msg.lParam.0));
                }
            }
            WM_HOTKEY_REQUEST => {
                while let Ok(request) = requests.try_recv() {
                    handle_request(request, &mut registry);
                }
            }
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }

    for id in registry.live {
        // SAFETY: each id was registered on this thread.
        unsafe {
            let _ = UnregisterHotKey(None, id);
        }
    }
}

/// Ids registered on the hotkey thread, and the last one handed out.
#[derive(Default)]
struct Registry {
    last: i32,
    live: Vec<i32>,
}

impl Registry {
    /// The next id after the last one handed out that is not in use,
    /// wrapping from [`MAX_HOTKEY_ID`] back to 1.
    fn next_free(&self) -> Option<i32> {
        (1..=MAX_HOTKEY_ID)
            .map(|step| (self.last + step - 1) % MAX_HOTKEY_ID + 1)
            .find(|id| !self.live.contains(id))
    }
}

fn handle_request(request: Request, registry: &mut Registry) {
    match request {
        Request::Register {
            key_code,
            modifiers,
            reply,
        } => {
            let Some(id) = registry.next_free() else {
                let _ = reply.send(Err("no free hotkey id".into()));
                return;
            };
            // SAFETY: RegisterHotKey binds the hotkey to this thread's
            // message queue. `id` is not registered on it yet.
            let result =
                unsafe { RegisterHotKey(None, id, HOT_KEY_MODIFIERS(modifiers.bits()), key_code) };
            let result = result.map(|()| id).map_err(|e| e.message());
            if result.is_ok() {
                registry.last = id;
                registry.live.push(id);
            }
            let _ = reply.send(result);
        }
        Request::Unregister { id, reply } => {
            // SAFETY: UnregisterHotKey removes a registration made on this
            // thread. Unknown ids are reported back as an error.
            let result = unsafe { UnregisterHotKey(None, id) }.map_err(|e| e.message());
            registry.live.retain(|r| *r != id);
            let _ = reply.send(result);
        }
    }
}

/// Decodes the `lParam` of `WM_HOTKEY`: modifiers in the low word, the
/// virtual key in the high word.
fn decode_press(lparam: isize) -> HotkeyPress {
    let bits = lparam as usize;
    HotkeyPress {
        key_code: ((bits >> 16) & 0xFFFF) as u32,
        modifiers: Modifiers((bits & 0xFFFF) as u32),
    }
}
