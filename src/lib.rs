//! Deliver synthetic keystrokes and Unicode text to a window that is not in
//! the foreground.
//!
//! The target window is brought forward just long enough to learn which of
//! its controls holds keyboard focus; messages are then posted (or sent) to
//! that control and the previous foreground window is restored. See
//! [`protocol`] for the exact steps and [`actions`] for building input.

pub use cross_window_input_core::{
    Action, Batch, BatchItem, DeliveryMode, Desktop, Encoding, ErrorKind, InputRecord, KeyPhase,
    KeyPress, KeyboardLayout, MAX_WAIT_MS, Outcome, SendError, SendOptions, Target, Text,
    WindowHandle, WindowName, codec, keys, protocol,
};

pub mod actions;
pub mod cli;
pub mod config;

#[cfg(windows)]
mod helpers;

#[cfg(windows)]
pub mod platform;

#[cfg(windows)]
mod send;

#[cfg(windows)]
pub use send::{send_to_window, send_to_window_with};

pub mod utils;
