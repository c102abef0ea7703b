//! Compiler settings.
//!
//! Settings come from, in order of precedence: command-line flags, a config
//! file, then defaults. The config file is the first of these that exists:
//!
//! 1. the file passed with `--config`
//! 2. `styx.toml`, then `pyproject.toml` in the input folder
//! 3. `styx.toml`, then `pyproject.toml` in the working directory
//!
//! `styx.toml` holds the keys at the top level; `pyproject.toml` holds them
//! under `[tool.styx]`. Relative paths are resolved against the directory of
//! the file that declares them.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::language::Language;

const CONFIG_FILE_NAMES: [&str; 2] = ["styx.toml", "pyproject.toml"];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("configuration file '{}' does not exist", .path.display())]
    #[diagnostic(
        code(styx::config::not_found),
        help("pass --input-folder to compile without a configuration file")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(styx::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{}'", .path.display())]
    #[diagnostic(code(styx::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Keys a config file may set.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSettings {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub language: Option<Language>,
    pub debug: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PyProject {
    tool: PyProjectTools,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PyProjectTools {
    styx: FileSettings,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let settings = if path.file_name().is_some_and(|name| name == "pyproject.toml") {
            toml::from_str::<PyProject>(&text)
                .map_err(parse_error)?
                .tool
                .styx
        } else {
            toml::from_str::<FileSettings>(&text).map_err(parse_error)?
        };

        let base = path.parent().unwrap_or(Path::new("."));
        Ok(settings.relative_to(base))
    }

    fn relative_to(self, base: &Path) -> Self {
        Self {
            input_path: self.input_path.map(|p| base.join(p)),
            output_path: self.output_path.map(|p| base.join(p)),
            ..self
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub language: Option<Language>,
    pub debug: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Folder searched recursively for `*.json` descriptors.
    pub input_path: PathBuf,
    /// Where modules are written; `None` prints them instead.
    pub output_path: Option<PathBuf>,
    pub language: Language,
    pub debug: bool,
}

impl Settings {
    pub fn collect(work_dir: &Path, overrides: Overrides) -> Result<Self, ConfigError> {
        let config_path = overrides
            .config
            .clone()
            .or_else(|| find_config(overrides.input_path.as_deref(), work_dir));

        let file = match config_path {
            Some(path) if path.exists() => FileSettings::load(&path)?,
            // An explicit but missing config is fine when the input is given
            Some(path) if overrides.input_path.is_none() => {
                return Err(ConfigError::NotFound { path });
            }
            _ => FileSettings::default(),
        };

        Ok(Self {
            input_path: overrides
                .input_path
                .or(file.input_path)
                .unwrap_or_else(|| work_dir.to_path_buf()),
            output_path: overrides.output_path.or(file.output_path),
            language: overrides.language.or(file.language).unwrap_or_default(),
            debug: overrides.debug || file.debug.unwrap_or(false),
        })
    }
}

fn find_config(input_path: Option<&Path>, work_dir: &Path) -> Option<PathBuf> {
    input_path
        .into_iter()
        .chain(std::iter::once(work_dir))
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}
