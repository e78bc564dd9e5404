use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cross_window_input::{cli::Cli, utils::tracing::init_tracing};

#[cfg(windows)]
fn main() -> anyhow::Result<ExitCode> {
    use cross_window_input::{SendOptions, platform::win::SystemLayout, send_to_window_with};

    init_tracing();
    let cli = Cli::parse();

    let config = cli.load_config().context("failed to load configuration")?;
    let actions = cli.actions(&SystemLayout)?;

    let outcome = send_to_window_with(cli.target(), &actions, &SendOptions::from(&config));
    if outcome.is_ok() {
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("{}", outcome.message());
    Ok(ExitCode::from(outcome.kind().code()))
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    cli.load_config().context("failed to load configuration")?;
    anyhow::bail!("cwi can only deliver input on Windows")
}
