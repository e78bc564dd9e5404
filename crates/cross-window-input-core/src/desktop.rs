//! The seam between the engine and the windowing system.
//!
//! Everything the focus protocol and the interpreter need from the OS goes
//! through [`Desktop`]. The Windows backend implements it with user32 calls;
//! tests implement it with a recorder.

use crate::{
    action::{DeliveryMode, Encoding, InputRecord},
    timing::{self, WaitError},
};

/// Raw window handle value (`HWND`), kept as an integer so it is `Send`,
/// hashable and printable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThreadId(pub u32);

/// Exact window title to look up. The variant picks the lookup call
/// (`FindWindowA` or `FindWindowW`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowName {
    Narrow(String),
    Wide(Vec<u16>),
}

/// Failure reported by an OS call, with the thread's last-error code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("os error {code}")]
pub struct OsError {
    pub code: u32,
}

impl OsError {
    pub const fn new(code: u32) -> Self {
        Self { code }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    KeyDown,
    KeyUp,
    Char,
}

/// A `WM_KEYDOWN` / `WM_KEYUP` / `WM_CHAR` message ready for delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowMessage {
    pub kind: MessageKind,
    pub wparam: usize,
    pub lparam: isize,
}

pub trait Desktop {
    /// Top-level window whose title matches exactly. First match wins.
    fn find_window(&mut self, name: &WindowName) -> Result<WindowHandle, OsError>;

    fn foreground_window(&mut self) -> Result<WindowHandle, OsError>;

    fn window_thread_id(&mut self, window: WindowHandle) -> Option<ThreadId>;

    fn current_thread_id(&mut self) -> Option<ThreadId>;

    /// Routes `caller`'s input processing through `target`'s input queue.
    fn attach_input(&mut self, caller: ThreadId, target: ThreadId) -> Result<(), OsError>;

    fn detach_input(&mut self, caller: ThreadId, target: ThreadId) -> Result<(), OsError>;

    fn restore_if_minimized(&mut self, window: WindowHandle);

    fn set_foreground(&mut self, window: WindowHandle) -> Result<(), OsError>;

    /// Window holding keyboard focus for the (attached) calling thread.
    fn focused_window(&mut self) -> Result<WindowHandle, OsError>;

    /// Best effort; the result is not observable.
    fn set_focus(&mut self, window: WindowHandle);

    fn deliver(
        &mut self,
        window: WindowHandle,
        mode: DeliveryMode,
        encoding: Encoding,
        message: WindowMessage,
    ) -> Result<(), OsError>;

    /// Submits all records as one uninterruptible injection.
    fn inject(&mut self, records: &[InputRecord]) -> Result<(), OsError>;

    fn wait(&mut self, ms: u32) -> Result<(), WaitError> {
        timing::wait_for(ms)
    }
}
