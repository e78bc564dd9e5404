use cross_window_input_core::{Action, Outcome, SendOptions, Target, protocol};

use crate::platform::win::WindowsDesktop;

/// Delivers `actions` to the window identified by `target` with default
/// options: 100 ms settle time, 1 ms delay, narrow text, posted messages.
pub fn send_to_window(target: impl Into<Target>, actions: &[Action]) -> Outcome {
    send_to_window_with(target, actions, &SendOptions::default())
}

pub fn send_to_window_with(
    target: impl Into<Target>,
    actions: &[Action],
    options: &SendOptions,
) -> Outcome {
    let mut desktop = WindowsDesktop::new();
    protocol::send_to_window(&mut desktop, &target.into(), actions, options)
}
