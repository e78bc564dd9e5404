use crate::desktop::OsError;

/// Classification of a failed send. `None` marks success.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    None = 0,
    CanNotSendMessage = 1,
    CanNotFindTargetWindow = 2,
    CanNotFindForegroundWindow = 3,
    CanNotReceiveTargetWindowThreadId = 4,
    CanNotReceiveCallerWindowThreadId = 5,
    CanNotAttachCallerToTarget = 6,
    CanNotSetTargetWindowAsForeground = 7,
    CanNotGetWindowWithKeyboardFocus = 8,
    CanNotSetCallerWindowAsForeground = 9,
    CanNotDetachCallerFromTarget = 10,
    CallerIsTarget = 11,
    CanNotWait = 12,
}

impl ErrorKind {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::None => "none",
            ErrorKind::CanNotSendMessage => "can_not_send_message",
            ErrorKind::CanNotFindTargetWindow => "can_not_find_target_window",
            ErrorKind::CanNotFindForegroundWindow => "can_not_find_foreground_window",
            ErrorKind::CanNotReceiveTargetWindowThreadId => {
                "can_not_receive_target_window_thread_id"
            }
            ErrorKind::CanNotReceiveCallerWindowThreadId => {
                "can_not_receive_caller_window_thread_id"
            }
            ErrorKind::CanNotAttachCallerToTarget => "can_not_attach_caller_to_target",
            ErrorKind::CanNotSetTargetWindowAsForeground => {
                "can_not_set_target_window_as_foreground"
            }
            ErrorKind::CanNotGetWindowWithKeyboardFocus => {
                "can_not_get_window_with_keyboard_focus"
            }
            ErrorKind::CanNotSetCallerWindowAsForeground => {
                "can_not_set_caller_window_as_foreground"
            }
            ErrorKind::CanNotDetachCallerFromTarget => "can_not_detach_caller_from_target",
            ErrorKind::CallerIsTarget => "caller_is_target",
            ErrorKind::CanNotWait => "can_not_wait",
        }
    }
}

/// A failed step of a send: what failed, a readable description and, when an
/// OS call failed, the last-error code captured right after it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SendError {
    kind: ErrorKind,
    message: String,
    os_code: Option<u32>,
}

impl SendError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            os_code: None,
        }
    }

    pub fn with_os_error(kind: ErrorKind, message: impl Into<String>, err: OsError) -> Self {
        Self {
            kind,
            message: message.into(),
            os_code: Some(err.code),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn os_code(&self) -> Option<u32> {
        self.os_code
    }
}

pub type Result<T> = std::result::Result<T, SendError>;
