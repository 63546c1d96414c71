use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

mod brew;
mod cli;
mod config;
mod controller;
mod error;
mod gui;
mod task;
mod utils;

use brew::Homebrew;
use cli::Cli;
use config::Config;

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    });
    let brew = Homebrew::new(config.resolve_brew_path(cli.brew.as_deref()));
    tracing::info!(brew = %brew.path().display(), "brewgui starting");

    if utils::is_root() {
        utils::print_warning("Homebrew refuses to run as root; brew commands will fail.");
    }

    match cli.run(Arc::new(brew)) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "brewgui failed");
            Err(e)
        }
    }
}
