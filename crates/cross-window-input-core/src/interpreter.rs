//! Executes an action sequence against one window.

use crate::{
    action::{Action, DeliveryMode, Encoding, KeyPress, Text},
    desktop::{Desktop, MessageKind, OsError, WindowHandle, WindowMessage},
    error::{ErrorKind, Result, SendError},
    timing::WaitError,
};

/// Delay applied after paced actions until a `Delay` action changes it.
pub const DEFAULT_DELAY_MS: u32 = 1;

/// Running modes of one interpretation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InterpreterState {
    pub delay_ms: u32,
    pub encoding: Encoding,
    pub delivery: DeliveryMode,
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            encoding: Encoding::default(),
            delivery: DeliveryMode::default(),
        }
    }
}

pub struct Interpreter<'a, D: Desktop + ?Sized> {
    desktop: &'a mut D,
    window: WindowHandle,
    state: InterpreterState,
}

impl<'a, D: Desktop + ?Sized> Interpreter<'a, D> {
    pub fn new(desktop: &'a mut D, window: WindowHandle) -> Self {
        Self {
            desktop,
            window,
            state: InterpreterState::default(),
        }
    }

    pub fn with_state(mut self, state: InterpreterState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Runs `actions` in order. The first failure stops the run; actions after
    /// it are never attempted and input already delivered stays delivered.
    pub fn run(&mut self, actions: &[Action]) -> Result<()> {
        for (index, action) in actions.iter().enumerate() {
            tracing::trace!(index, ?action, "interpret");
            self.step(action)?;

            if action.is_paced() {
                let delay = self.state.delay_ms;
                self.desktop
                    .wait(delay)
                    .map_err(|e| wait_error(e, "after delivering an action"))?;
            }
        }
        Ok(())
    }

    fn step(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Key(key) => self.key(key),
            Action::Text(text) => self.text(text),
            Action::Batch(batch) => {
                if batch.is_empty() {
                    return Ok(());
                }
                self.desktop.inject(batch.records()).map_err(|e| {
                    tracing::debug!(code = e.code, records = batch.records().len(), "inject failed");
                    SendError::with_os_error(
                        ErrorKind::CanNotSendMessage,
                        "Can not inject batched input.",
                        e,
                    )
                })
            }
            Action::Wait(ms) => self
                .desktop
                .wait(*ms)
                .map_err(|e| wait_error(e, "from a wait action")),
            Action::Delay(ms) => {
                self.state.delay_ms = *ms;
                Ok(())
            }
            Action::Encoding(encoding) => {
                self.state.encoding = *encoding;
                Ok(())
            }
            Action::Delivery(mode) => {
                self.state.delivery = *mode;
                Ok(())
            }
        }
    }

    fn key(&mut self, key: &KeyPress) -> Result<()> {
        let wparam = usize::from(key.vk());
        if key.phase().has_down() {
            self.deliver(
                WindowMessage {
                    kind: MessageKind::KeyDown,
                    wparam,
                    lparam: key.lparam_down(),
                },
                "key down message",
            )?;
        }
        if key.phase().has_up() {
            self.deliver(
                WindowMessage {
                    kind: MessageKind::KeyUp,
                    wparam,
                    lparam: key.lparam_up(),
                },
                "key up message",
            )?;
        }
        Ok(())
    }

    fn text(&mut self, text: &Text) -> Result<()> {
        let char_message = |wparam| WindowMessage {
            kind: MessageKind::Char,
            wparam,
            lparam: 0,
        };
        match self.state.encoding {
            Encoding::Narrow => {
                for &byte in text.utf8().as_bytes() {
                    self.deliver(char_message(usize::from(byte)), "character message")?;
                }
            }
            Encoding::Wide => {
                for &unit in text.utf16() {
                    self.deliver(char_message(usize::from(unit)), "character message")?;
                }
            }
        }
        Ok(())
    }

    fn deliver(&mut self, message: WindowMessage, what: &str) -> Result<()> {
        let InterpreterState {
            delivery, encoding, ..
        } = self.state;
        self.desktop
            .deliver(self.window, delivery, encoding, message)
            .map_err(|e: OsError| {
                tracing::debug!(code = e.code, ?message, ?delivery, ?encoding, "delivery failed");
                let verb = match delivery {
                    DeliveryMode::Post => "post",
                    DeliveryMode::Send => "send",
                };
                SendError::with_os_error(
                    ErrorKind::CanNotSendMessage,
                    format!("Can not {verb} {what}."),
                    e,
                )
            })
    }
}

fn wait_error(e: WaitError, origin: &str) -> SendError {
    tracing::debug!(error = e.as_str(), origin, "wait failed");
    SendError::new(
        ErrorKind::CanNotWait,
        format!(
            "Can not wait for specified amount of time {origin} ({}).",
            e.as_str()
        ),
    )
}

/// Interprets `actions` against `window` starting from default modes.
pub fn interpret<D: Desktop + ?Sized>(
    desktop: &mut D,
    window: WindowHandle,
    actions: &[Action],
) -> Result<()> {
    Interpreter::new(desktop, window).run(actions)
}
