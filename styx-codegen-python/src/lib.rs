//! Python backend for the Styx wrapper compiler.
//!
//! Compiles descriptors into typed Python modules built on the `styxdefs`
//! runtime: one entry point function per tool, a `@dataclasses.dataclass`
//! per sub-command and a `typing.NamedTuple` per output record.
//!
//! ```ignore
//! use styx_codegen::language::LanguageCodegen;
//! use styx_codegen_python::PythonCodegen;
//!
//! let source = PythonCodegen::new().compile(&interface)?;
//! ```

mod generator;
mod naming;
mod provider;
mod renderer;
mod type_mapper;

pub use generator::PythonCodegen;
pub use naming::PY_NAMING;
pub use provider::PythonProvider;
pub use styx_codegen::language::{LanguageCodegen, LanguageProvider};
