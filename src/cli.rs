//! Command line of the `cwi` binary.

use std::{io, path::PathBuf};

use clap::Parser;
use cross_window_input_core::{
    Action, KeyboardLayout, ScriptError, Target, codec, parse_steps,
};

use crate::config::{self, Config};

#[derive(Debug, Parser)]
#[command(
    name = "cwi",
    version,
    about = "Send keystrokes and text to a window that is not in the foreground",
    after_help = "Steps: key:NAME down:NAME up:NAME text:TEXT wait:MS delay:MS \
                  mode:post|send encoding:narrow|wide, and [ ... ] to inject key and \
                  text steps as one batch.\n\nExample: cwi \"Some Window\" key:RETURN text:/kills key:RETURN"
)]
pub struct Cli {
    /// Look the title up with the UTF-16 window API.
    #[arg(long)]
    pub wide_name: bool,

    /// Configuration file to use instead of the one under %APPDATA%.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exact title of the target window.
    pub window: String,

    /// Steps to perform, in order.
    #[arg(required = true, allow_hyphen_values = true)]
    pub steps: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("a wait or delay is longer than one hour")]
    WaitTooLong,
}

impl Cli {
    pub fn target(&self) -> Target {
        if self.wide_name {
            Target::wide_name(&codec::to_wide(&self.window))
        } else {
            Target::name(&self.window)
        }
    }

    pub fn load_config(&self) -> io::Result<Config> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        }
    }

    /// Parses the steps and rejects waits that can never succeed before
    /// anything is sent.
    pub fn actions<L: KeyboardLayout + ?Sized>(&self, layout: &L) -> Result<Vec<Action>, CliError> {
        let actions = parse_steps(&self.steps, layout)?;
        if !actions.iter().all(Action::is_within_wait_bound) {
            return Err(CliError::WaitTooLong);
        }
        Ok(actions)
    }
}
