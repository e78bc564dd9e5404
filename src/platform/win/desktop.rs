use std::ffi::{CString, c_void};

use cross_window_input_core::{
    DeliveryMode, Desktop, Encoding, InputRecord, MessageKind, OsError, ThreadId, WaitError,
    WindowHandle, WindowMessage, WindowName, timing,
};
use windows::{
    Win32::{
        Foundation::{
            ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER, ERROR_INVALID_WINDOW_HANDLE, GetLastError,
            HWND, LPARAM, WPARAM,
        },
        System::Threading::{AttachThreadInput, GetCurrentThreadId},
        UI::{
            Input::KeyboardAndMouse::{GetFocus, SetFocus},
            WindowsAndMessaging::{
                FindWindowA, FindWindowW, GetForegroundWindow, GetWindowThreadProcessId, IsIconic,
                PostMessageA, PostMessageW, SW_RESTORE, SendMessageA, SendMessageW,
                SetForegroundWindow, ShowWindow, WM_CHAR, WM_KEYDOWN, WM_KEYUP,
            },
        },
    },
    core::{PCSTR, PCWSTR},
};

use super::{counter::PerformanceCounter, input};
use crate::helpers::{clear_last_error, last_os_error, os_error};

/// [`Desktop`] backed by user32.
///
/// Every call runs on the calling thread, whose input queue is the one that
/// gets attached to the target's.
#[derive(Debug, Default)]
pub struct WindowsDesktop;

impl WindowsDesktop {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

fn valid(hwnd: HWND) -> Result<WindowHandle, OsError> {
    if hwnd.is_invalid() {
        Err(last_os_error())
    } else {
        Ok(handle(hwnd))
    }
}

fn message_id(kind: MessageKind) -> u32 {
    match kind {
        MessageKind::KeyDown => WM_KEYDOWN,
        MessageKind::KeyUp => WM_KEYUP,
        MessageKind::Char => WM_CHAR,
    }
}

fn attach(caller: ThreadId, target: ThreadId, on: bool) -> Result<(), OsError> {
    if unsafe { AttachThreadInput(caller.0, target.0, on) }.as_bool() {
        Ok(())
    } else {
        Err(last_os_error())
    }
}

impl Desktop for WindowsDesktop {
    fn find_window(&mut self, name: &WindowName) -> Result<WindowHandle, OsError> {
        let found = match name {
            WindowName::Narrow(title) => {
                let title = CString::new(title.as_bytes())
                    .map_err(|_| OsError::new(ERROR_INVALID_PARAMETER.0))?;
                unsafe { FindWindowA(PCSTR::null(), PCSTR(title.as_ptr().cast())) }
            }
            WindowName::Wide(title) => {
                let mut title = title.clone();
                if title.last() != Some(&0) {
                    title.push(0);
                }
                unsafe { FindWindowW(PCWSTR::null(), PCWSTR(title.as_ptr())) }
            }
        };
        found.map(handle).map_err(|e| os_error(&e))
    }

    fn foreground_window(&mut self) -> Result<WindowHandle, OsError> {
        valid(unsafe { GetForegroundWindow() })
    }

    fn window_thread_id(&mut self, window: WindowHandle) -> Option<ThreadId> {
        let tid = unsafe { GetWindowThreadProcessId(hwnd(window), None) };
        (tid != 0).then_some(ThreadId(tid))
    }

    fn current_thread_id(&mut self) -> Option<ThreadId> {
        let tid = unsafe { GetCurrentThreadId() };
        (tid != 0).then_some(ThreadId(tid))
    }

    fn attach_input(&mut self, caller: ThreadId, target: ThreadId) -> Result<(), OsError> {
        attach(caller, target, true)
    }

    fn detach_input(&mut self, caller: ThreadId, target: ThreadId) -> Result<(), OsError> {
        attach(caller, target, false)
    }

    fn restore_if_minimized(&mut self, window: WindowHandle) {
        let hwnd = hwnd(window);
        if unsafe { IsIconic(hwnd) }.as_bool() {
            tracing::trace!(?window, "restoring minimized target");
            let _ = unsafe { ShowWindow(hwnd, SW_RESTORE) };
        }
    }

    fn set_foreground(&mut self, window: WindowHandle) -> Result<(), OsError> {
        if unsafe { SetForegroundWindow(hwnd(window)) }.as_bool() {
            Ok(())
        } else {
            Err(last_os_error())
        }
    }

    fn focused_window(&mut self) -> Result<WindowHandle, OsError> {
        valid(unsafe { GetFocus() })
    }

    fn set_focus(&mut self, window: WindowHandle) {
        if let Err(e) = unsafe { SetFocus(Some(hwnd(window))) } {
            tracing::trace!(?window, error = ?e, "SetFocus failed");
        }
    }

    fn deliver(
        &mut self,
        window: WindowHandle,
        mode: DeliveryMode,
        encoding: Encoding,
        message: WindowMessage,
    ) -> Result<(), OsError> {
        let hwnd = hwnd(window);
        let msg = message_id(message.kind);
        let wparam = WPARAM(message.wparam);
        let lparam = LPARAM(message.lparam);

        match mode {
            DeliveryMode::Post => {
                let posted = match encoding {
                    Encoding::Narrow => unsafe { PostMessageA(Some(hwnd), msg, wparam, lparam) },
                    Encoding::Wide => unsafe { PostMessageW(Some(hwnd), msg, wparam, lparam) },
                };
                posted.map_err(|e| os_error(&e))
            }
            DeliveryMode::Send => {
                // SendMessage returns the window procedure's result; a dead
                // window or a UIPI block shows up only in the last error.
                clear_last_error();
                let _ = match encoding {
                    Encoding::Narrow => unsafe {
                        SendMessageA(hwnd, msg, Some(wparam), Some(lparam))
                    },
                    Encoding::Wide => unsafe {
                        SendMessageW(hwnd, msg, Some(wparam), Some(lparam))
                    },
                };
                let code = unsafe { GetLastError() };
                if code == ERROR_INVALID_WINDOW_HANDLE || code == ERROR_ACCESS_DENIED {
                    Err(OsError::new(code.0))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn inject(&mut self, records: &[InputRecord]) -> Result<(), OsError> {
        input::send_records(records)
    }

    fn wait(&mut self, ms: u32) -> Result<(), WaitError> {
        timing::wait_with(&PerformanceCounter, ms)
    }
}
