use serde::Deserialize;

use super::{Config, DeliverySetting, EncodingSetting};

/// Configuration as written on disk, before validation. Missing keys take
/// their default values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub delay_ms: u32,
    pub settle_ms: u32,
    pub encoding: EncodingSetting,
    pub delivery: DeliverySetting,
}

impl Default for RawConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            delay_ms: config.delay_ms,
            settle_ms: config.settle_ms,
            encoding: config.encoding,
            delivery: config.delivery,
        }
    }
}
