mod commands;
mod config;
mod language;
mod logging;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    Cli::parse().run()
}
