//! Code generation building blocks.
//!
//! This module provides the core primitives for generating code:
//! - [`CodeBuilder`] - Indentation-aware line buffer
//! - [`Indent`] - Indentation width of a target
//!
//! # Declarative Specifications
//!
//! - [`StructSpec`] - Data classes and output records
//! - [`FunctionSpec`], [`ArgSpec`] - Functions, methods and their arguments
//! - [`TypeRef`] - Language-agnostic type references
//! - [`TypeMapper`] - Trait for language-specific type rendering

mod code_builder;
mod function;
mod indent;
mod structure;
mod types;

pub use code_builder::CodeBuilder;
pub use function::{ArgSpec, FunctionSpec};
pub use indent::Indent;
pub use structure::StructSpec;
pub use types::{PrimitiveType, TypeMapper, TypeRef};
