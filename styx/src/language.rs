//! Target language selection.

use clap::ValueEnum;
use serde::Deserialize;
use styx_codegen::language::LanguageCodegen;
use styx_codegen_python::PythonCodegen;
use styx_codegen_typescript::TypeScriptCodegen;

/// Language the wrappers are generated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Typescript,
}

impl Language {
    /// Backend compiling and rendering modules for this language.
    pub fn codegen(self) -> Box<dyn LanguageCodegen> {
        match self {
            Language::Python => Box::new(PythonCodegen::new()),
            Language::Typescript => Box::new(TypeScriptCodegen::new()),
        }
    }
}
