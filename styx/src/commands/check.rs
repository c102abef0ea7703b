use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    config::{Overrides, Settings},
    logging, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Folder searched recursively for JSON descriptors
    #[arg(short, long)]
    pub input_folder: Option<PathBuf>,

    /// Path to styx.toml or pyproject.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List the lints that run and exit
    #[arg(long)]
    pub list_lints: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        if self.list_lints {
            ops::list_lints().render(&mut TerminalOutput::new());
            return Ok(());
        }

        let work_dir = std::env::current_dir()?;
        let overrides = Overrides {
            input_path: self.input_folder.clone(),
            config: self.config.clone(),
            ..Overrides::default()
        };
        let settings = Settings::collect(&work_dir, overrides).unwrap_or_exit();
        logging::init(settings.debug);

        let report = ops::check(&settings.input_path)?;
        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
