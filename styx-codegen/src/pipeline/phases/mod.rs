//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs descriptor lints and collects diagnostics
//! - [`CompilePhase`] - compiles the descriptor for one target language

mod compile;
mod validate;

pub use compile::CompilePhase;
pub use validate::{
    EmptyDescriptionLint, Lint, LintInfo, ReferenceLint, TemplateTypeLint, ValidatePhase,
};
