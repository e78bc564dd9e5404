//! Borrowing keyboard routing from the target window's thread.
//!
//! Messages only reach a child control reliably when the sender knows which
//! window holds keyboard focus, and focus is per input queue. The protocol
//! joins the caller's input queue to the target thread's queue, brings the
//! target to the foreground, reads the focused window, interprets the actions
//! against it, then hands the foreground back and separates the queues again.
//!
//! Phases run strictly in order and the first failure ends the send. Once the
//! queues are attached, restoring the caller's foreground window and detaching
//! are always attempted; their failures are reported only when nothing failed
//! before them.

use crate::{
    action::Action,
    desktop::{Desktop, ThreadId, WindowHandle, WindowName},
    error::{ErrorKind, Result, SendError},
    interpreter::{Interpreter, InterpreterState},
    outcome::Outcome,
};

/// Pause between focusing the target and the first action.
pub const DEFAULT_SETTLE_MS: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Handle(WindowHandle),
    Name(WindowName),
}

impl Target {
    pub fn name(title: &str) -> Self {
        Target::Name(WindowName::Narrow(title.to_owned()))
    }

    pub fn wide_name(title: &[u16]) -> Self {
        Target::Name(WindowName::Wide(title.to_vec()))
    }
}

impl From<WindowHandle> for Target {
    fn from(window: WindowHandle) -> Self {
        Target::Handle(window)
    }
}

impl From<&str> for Target {
    fn from(title: &str) -> Self {
        Target::name(title)
    }
}

impl From<String> for Target {
    fn from(title: String) -> Self {
        Target::Name(WindowName::Narrow(title))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SendOptions {
    /// Milliseconds to wait after the target gained focus, before the first
    /// action. Also primes the wait counter.
    pub settle_ms: u32,
    /// Modes the interpreter starts from.
    pub initial: InterpreterState,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE_MS,
            initial: InterpreterState::default(),
        }
    }
}

/// Delivers `actions` to `target` and reports how it went.
pub fn send_to_window<D: Desktop + ?Sized>(
    desktop: &mut D,
    target: &Target,
    actions: &[Action],
    options: &SendOptions,
) -> Outcome {
    let result = run(desktop, target, actions, options);
    if let Err(e) = &result {
        tracing::debug!(kind = e.kind().as_str(), code = ?e.os_code(), "send failed: {e}");
    }
    result.into()
}

fn run<D: Desktop + ?Sized>(
    desktop: &mut D,
    target: &Target,
    actions: &[Action],
    options: &SendOptions,
) -> Result<()> {
    let target_window = resolve(desktop, target)?;

    let foreground = desktop.foreground_window().map_err(|e| {
        SendError::with_os_error(
            ErrorKind::CanNotFindForegroundWindow,
            "Can not find foreground window.",
            e,
        )
    })?;

    let target_thread = desktop.window_thread_id(target_window).ok_or_else(|| {
        SendError::new(
            ErrorKind::CanNotReceiveTargetWindowThreadId,
            "Can not receive target window thread id.",
        )
    })?;

    let caller_thread = desktop.current_thread_id().ok_or_else(|| {
        SendError::new(
            ErrorKind::CanNotReceiveCallerWindowThreadId,
            "Can not receive caller window thread id.",
        )
    })?;

    tracing::debug!(
        ?target_window,
        ?foreground,
        target_thread = target_thread.0,
        caller_thread = caller_thread.0,
        "send snapshot"
    );

    if target_thread == caller_thread {
        tracing::debug!("target window belongs to the calling thread");
        settle_and_interpret(desktop, target_window, actions, options)?;
        return Ok(());
    }

    desktop
        .attach_input(caller_thread, target_thread)
        .map_err(|e| {
            SendError::with_os_error(
                ErrorKind::CanNotAttachCallerToTarget,
                "Can not attach caller window thread to target window thread.",
                e,
            )
        })?;

    let ran = focus_and_run(desktop, target_window, actions, options);
    let restored = restore_caller(desktop, foreground);
    let detached = detach(desktop, caller_thread, target_thread);

    ran.and(restored).and(detached)
}

fn resolve<D: Desktop + ?Sized>(desktop: &mut D, target: &Target) -> Result<WindowHandle> {
    match target {
        Target::Handle(window) => Ok(*window),
        Target::Name(name) => desktop.find_window(name).map_err(|e| {
            SendError::with_os_error(
                ErrorKind::CanNotFindTargetWindow,
                "Can not find target window.",
                e,
            )
        }),
    }
}

fn focus_and_run<D: Desktop + ?Sized>(
    desktop: &mut D,
    target_window: WindowHandle,
    actions: &[Action],
    options: &SendOptions,
) -> Result<()> {
    desktop.restore_if_minimized(target_window);

    desktop.set_foreground(target_window).map_err(|e| {
        SendError::with_os_error(
            ErrorKind::CanNotSetTargetWindowAsForeground,
            "Can not set target window as foreground window.",
            e,
        )
    })?;

    let focused = desktop.focused_window().map_err(|e| {
        SendError::with_os_error(
            ErrorKind::CanNotGetWindowWithKeyboardFocus,
            "Can not get window with keyboard focus.",
            e,
        )
    })?;
    tracing::debug!(?focused, "keyboard focus");

    settle_and_interpret(desktop, focused, actions, options)
}

fn settle_and_interpret<D: Desktop + ?Sized>(
    desktop: &mut D,
    window: WindowHandle,
    actions: &[Action],
    options: &SendOptions,
) -> Result<()> {
    desktop.wait(options.settle_ms).map_err(|e| {
        SendError::new(
            ErrorKind::CanNotWait,
            format!(
                "Can not wait for the target window to settle ({}).",
                e.as_str()
            ),
        )
    })?;

    Interpreter::new(desktop, window)
        .with_state(options.initial)
        .run(actions)
}

fn restore_caller<D: Desktop + ?Sized>(desktop: &mut D, foreground: WindowHandle) -> Result<()> {
    desktop.set_foreground(foreground).map_err(|e| {
        SendError::with_os_error(
            ErrorKind::CanNotSetCallerWindowAsForeground,
            "Can not set caller window back to foreground.",
            e,
        )
    })?;
    desktop.set_focus(foreground);
    Ok(())
}

fn detach<D: Desktop + ?Sized>(desktop: &mut D, caller: ThreadId, target: ThreadId) -> Result<()> {
    desktop.detach_input(caller, target).map_err(|e| {
        SendError::with_os_error(
            ErrorKind::CanNotDetachCallerFromTarget,
            "Can not detach caller window thread from target window thread.",
            e,
        )
    })
}
