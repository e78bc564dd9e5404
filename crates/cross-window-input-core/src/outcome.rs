use crate::{
    codec,
    error::{ErrorKind, SendError},
};

/// Final result of a top-level send.
///
/// The message is composed once, in both encodings, when the outcome is built:
/// `"CWI error: <text>"`, plus `" (windows error code: N)"` when an OS code was
/// captured. `Outcome::ok()` has empty messages; an error built with
/// [`ErrorKind::None`] keeps its message but still reports success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    error: Option<SendError>,
    message: String,
    message_wide: Vec<u16>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.kind() == ErrorKind::None
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.as_ref().map_or(ErrorKind::None, SendError::kind)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_wide(&self) -> &[u16] {
        &self.message_wide
    }

    pub fn os_code(&self) -> Option<u32> {
        self.error.as_ref().and_then(SendError::os_code)
    }

    pub fn error(&self) -> Option<&SendError> {
        self.error.as_ref()
    }

    /// Converts back into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<(), SendError> {
        match self.error {
            Some(err) if err.kind() != ErrorKind::None => Err(err),
            _ => Ok(()),
        }
    }
}

impl From<SendError> for Outcome {
    fn from(err: SendError) -> Self {
        let mut message = format!("CWI error: {}", err.message());
        if let Some(code) = err.os_code() {
            message.push_str(&format!(" (windows error code: {code})"));
        }
        let message_wide = codec::to_wide(&message);
        Self {
            error: Some(err),
            message,
            message_wide,
        }
    }
}

impl From<Result<(), SendError>> for Outcome {
    fn from(result: Result<(), SendError>) -> Self {
        match result {
            Ok(()) => Outcome::ok(),
            Err(err) => err.into(),
        }
    }
}
