//! TypeScript backend for the Styx wrapper compiler.
//!
//! Compiles descriptors into TypeScript modules built on the `styxdefs`
//! runtime: one entry point function per tool, a class per sub-command and
//! an interface per output record.
//!
//! ```ignore
//! use styx_codegen::language::LanguageCodegen;
//! use styx_codegen_typescript::TypeScriptCodegen;
//!
//! let source = TypeScriptCodegen::new().compile(&interface)?;
//! ```

mod generator;
mod naming;
mod provider;
mod renderer;
mod type_mapper;

pub use generator::TypeScriptCodegen;
pub use naming::TS_NAMING;
pub use provider::TypeScriptProvider;
pub use styx_codegen::language::{LanguageCodegen, LanguageProvider};
