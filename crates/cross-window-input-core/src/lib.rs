//! Engine for delivering synthetic keyboard input to a window that is not in
//! the foreground.
//!
//! An ordered list of [`Action`]s is interpreted against whichever window holds
//! keyboard focus once the target has been brought forward through the
//! [`protocol`]. All OS access goes through the [`Desktop`] trait; the
//! `cross-window-input` crate provides the Windows implementation.

pub mod action;
pub mod codec;
pub mod desktop;
pub mod error;
pub mod interpreter;
pub mod keys;
pub mod outcome;
pub mod protocol;
pub mod script;
pub mod timing;

pub use action::{
    Action, Batch, BatchItem, DeliveryMode, Encoding, InputRecord, KeyPhase, KeyPress,
    KeyboardLayout, Text,
};
pub use desktop::{
    Desktop, MessageKind, OsError, ThreadId, WindowHandle, WindowMessage, WindowName,
};
pub use error::{ErrorKind, SendError};
pub use interpreter::{DEFAULT_DELAY_MS, Interpreter, InterpreterState, interpret};
pub use outcome::Outcome;
pub use protocol::{DEFAULT_SETTLE_MS, SendOptions, Target, send_to_window};
pub use script::{ScriptError, parse_steps};
pub use timing::{MAX_WAIT_MS, WaitError};

#[cfg(test)]
mod tests;
