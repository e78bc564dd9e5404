//! Helpers for turning Win32 failures into [`OsError`] values.

use cross_window_input_core::OsError;
use windows::Win32::Foundation::{GetLastError, SetLastError, WIN32_ERROR};
use windows::core::Error;

/// Facility code `HRESULT_FROM_WIN32` places Win32 errors under.
const FACILITY_WIN32_HRESULT: u32 = 0x8007_0000;

/// Retrieve the calling thread's last OS error.
pub fn last_os_error() -> OsError {
    OsError::new(unsafe { GetLastError() }.0)
}

/// Recover the Win32 error code from a `windows::core::Error`.
///
/// The `windows` crate captures `GetLastError` when a call fails and stores it
/// as an `HRESULT`; other `HRESULT`s are passed through unchanged.
pub fn os_error(err: &Error) -> OsError {
    let hr = err.code().0.cast_unsigned();
    if hr & 0xFFFF_0000 == FACILITY_WIN32_HRESULT {
        OsError::new(hr & 0xFFFF)
    } else {
        OsError::new(hr)
    }
}

/// Clear the last error so a call that does not report failure through its
/// return value can be checked afterwards.
pub fn clear_last_error() {
    unsafe { SetLastError(WIN32_ERROR(0)) };
}
