//! Shorthand constructors for building action lists.
//!
//! ```no_run
//! # #[cfg(windows)] {
//! use cross_window_input::{actions::{key, text}, keys::VK_RETURN, send_to_window};
//!
//! let outcome = send_to_window("Some Window", &[key(VK_RETURN), text("/kills"), key(VK_RETURN)]);
//! if outcome.is_error() {
//!     eprintln!("{}", outcome.message());
//! }
//! # }
//! ```

use cross_window_input_core::{
    Action, BatchItem, DeliveryMode, Encoding, KeyPhase, KeyPress, KeyboardLayout,
};

/// Key press with an explicit layout, for hosts that resolve scan codes
/// themselves.
pub fn key_with_layout<L: KeyboardLayout + ?Sized>(vk: u16, phase: KeyPhase, layout: &L) -> Action {
    Action::Key(KeyPress::new(vk, phase, layout))
}

/// Presses and releases `vk`.
#[cfg(windows)]
pub fn key(vk: u16) -> Action {
    key_with_layout(vk, KeyPhase::DownAndUp, &crate::platform::win::SystemLayout)
}

#[cfg(windows)]
pub fn key_down(vk: u16) -> Action {
    key_with_layout(vk, KeyPhase::Down, &crate::platform::win::SystemLayout)
}

#[cfg(windows)]
pub fn key_up(vk: u16) -> Action {
    key_with_layout(vk, KeyPhase::Up, &crate::platform::win::SystemLayout)
}

pub fn text(text: &str) -> Action {
    Action::text(text)
}

pub fn wide_text(units: &[u16]) -> Action {
    Action::wide_text(units)
}

pub fn wait(ms: u32) -> Action {
    Action::wait(ms)
}

pub fn delay(ms: u32) -> Action {
    Action::delay(ms)
}

pub fn batch<I>(items: I) -> Action
where
    I: IntoIterator,
    I::Item: Into<BatchItem>,
{
    Action::batch(items)
}

pub fn encoding(encoding: Encoding) -> Action {
    Action::Encoding(encoding)
}

pub fn delivery(mode: DeliveryMode) -> Action {
    Action::Delivery(mode)
}
