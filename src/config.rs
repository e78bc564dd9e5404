mod config_validator;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
};

pub use config_validator::ConfigError;
use cross_window_input_core::{
    DEFAULT_DELAY_MS, DEFAULT_SETTLE_MS, DeliveryMode, Encoding, InterpreterState, SendOptions,
};
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

const APP_DIR: &str = "CrossWindowInput";
const CONFIG_FILE: &str = "config.toml";

/// Encoding the interpreter starts in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncodingSetting {
    #[default]
    #[serde(alias = "utf8")]
    Narrow,
    #[serde(alias = "utf16")]
    Wide,
}

/// Delivery mode the interpreter starts in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliverySetting {
    #[default]
    Post,
    Send,
}

impl From<EncodingSetting> for Encoding {
    fn from(setting: EncodingSetting) -> Self {
        match setting {
            EncodingSetting::Narrow => Encoding::Narrow,
            EncodingSetting::Wide => Encoding::Wide,
        }
    }
}

impl From<DeliverySetting> for DeliveryMode {
    fn from(setting: DeliverySetting) -> Self {
        match setting {
            DeliverySetting::Post => DeliveryMode::Post,
            DeliverySetting::Send => DeliveryMode::Send,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Pause after every key, text or batch action.
    pub delay_ms: u32,
    /// Pause between focusing the target and the first action.
    pub settle_ms: u32,
    pub encoding: EncodingSetting,
    pub delivery: DeliverySetting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            encoding: EncodingSetting::default(),
            delivery: DeliverySetting::default(),
        }
    }
}

impl From<&Config> for SendOptions {
    fn from(config: &Config) -> Self {
        SendOptions {
            settle_ms: config.settle_ms,
            initial: InterpreterState {
                delay_ms: config.delay_ms,
                encoding: config.encoding.into(),
                delivery: config.delivery.into(),
            },
        }
    }
}

pub fn config_path() -> io::Result<PathBuf> {
    let appdata = std::env::var_os("APPDATA")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "APPDATA is not set"))?;

    Ok(PathBuf::from(appdata).join(APP_DIR).join(CONFIG_FILE))
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

/// Loads the configuration from `%APPDATA%`, writing defaults on first use.
pub fn load() -> io::Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> io::Result<Config> {
    ensure_parent_dir(path)?;
    let config: Config = confy::load_path(path).map_err(confy_err)?;
    tracing::debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}

pub fn save(cfg: &Config) -> io::Result<()> {
    save_to(&config_path()?, cfg)
}

pub fn save_to(path: &Path, cfg: &Config) -> io::Result<()> {
    cfg.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    ensure_parent_dir(path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let config = Self {
            delay_ms: raw.delay_ms,
            settle_ms: raw.settle_ms,
            encoding: raw.encoding,
            delivery: raw.delivery,
        };
        config.validate()?;
        Ok(config)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}
