mod check;
mod compile;
mod completions;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use compile::CompileCommand;
use completions::CompletionsCommand;
use eyre::Result;

use crate::config::ConfigError;

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, ConfigError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "styx")]
#[command(version)]
#[command(about = "Compile command-line tool descriptors into typed wrapper modules")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compile(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a folder of JSON descriptors into wrapper modules
    Compile(CompileCommand),

    /// Validate descriptors without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
