use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    config::{Overrides, Settings},
    language::Language,
    logging,
    ops::{self, CompileOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CompileCommand {
    /// Folder searched recursively for JSON descriptors
    #[arg(short, long)]
    pub input_folder: Option<PathBuf>,

    /// Folder the compiled modules are written to (printed when omitted)
    #[arg(short, long)]
    pub output_folder: Option<PathBuf>,

    /// Path to styx.toml or pyproject.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target language (overrides the config file)
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Abort on the first failing descriptor and log verbosely
    #[arg(short, long)]
    pub debug: bool,

    /// Print compiled modules without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl CompileCommand {
    pub fn run(&self) -> Result<()> {
        let work_dir = std::env::current_dir()?;
        let settings = Settings::collect(&work_dir, self.overrides()).unwrap_or_exit();
        logging::init(settings.debug);
        tracing::debug!(?settings, "resolved settings");

        let codegen = settings.language.codegen();
        let report = ops::compile(
            codegen.as_ref(),
            CompileOptions {
                input_dir: &settings.input_path,
                output_dir: settings.output_path.as_deref(),
                dry_run: self.dry_run,
                debug: settings.debug,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            input_path: self.input_folder.clone(),
            output_path: self.output_folder.clone(),
            config: self.config.clone(),
            language: self.language,
            debug: self.debug,
        }
    }
}
