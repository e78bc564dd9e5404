//! `SendInput` record builders.

use cross_window_input_core::{InputRecord, OsError};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_KEYUP,
    KEYEVENTF_UNICODE, SendInput, VIRTUAL_KEY,
};

use crate::helpers::last_os_error;

fn keyboard_input(vk: u16, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn to_input(record: &InputRecord) -> INPUT {
    match *record {
        InputRecord::Key {
            vk,
            scan_code,
            key_up,
        } => {
            let flags = if key_up {
                KEYEVENTF_KEYUP
            } else {
                KEYBD_EVENT_FLAGS::default()
            };
            keyboard_input(vk, scan_code, flags)
        }
        InputRecord::Unicode { unit, key_up } => {
            let flags = if key_up {
                KEYEVENTF_UNICODE | KEYEVENTF_KEYUP
            } else {
                KEYEVENTF_UNICODE
            };
            keyboard_input(0, unit, flags)
        }
    }
}

fn input_struct_size_i32() -> Option<i32> {
    i32::try_from(std::mem::size_of::<INPUT>()).ok()
}

/// Submits all records in one `SendInput` call so no other input can be
/// interleaved with them.
pub(super) fn send_records(records: &[InputRecord]) -> Result<(), OsError> {
    let inputs: Vec<INPUT> = records.iter().map(to_input).collect();

    let Some(input_size) = input_struct_size_i32() else {
        return Err(OsError::new(windows::Win32::Foundation::ERROR_INVALID_PARAMETER.0));
    };

    let sent = unsafe { SendInput(&inputs, input_size) } as usize;
    if sent == inputs.len() {
        Ok(())
    } else {
        tracing::debug!(sent, expected = inputs.len(), "SendInput inserted fewer events");
        Err(last_os_error())
    }
}
