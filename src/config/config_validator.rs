use cross_window_input_core::MAX_WAIT_MS;

use crate::config::Config;

pub const DELAY_MS: &str = "delay_ms";
pub const SETTLE_MS: &str = "settle_ms";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' is {value} ms, the limit is {max} ms")]
    WaitTooLong {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

fn check_wait(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > MAX_WAIT_MS {
        return Err(ConfigError::WaitTooLong {
            field,
            value,
            max: MAX_WAIT_MS,
        });
    }
    Ok(())
}

impl Config {
    /// Rejects waits longer than the wait primitive accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_wait(DELAY_MS, self.delay_ms)?;
        check_wait(SETTLE_MS, self.settle_ms)
    }
}
