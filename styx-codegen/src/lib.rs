//! Language-agnostic compilation engine for the Styx wrapper compiler.
//!
//! This crate turns a [`styx_ir::Interface`] into a [`model::GenericModule`]:
//! functions, data classes and output records that a backend renders to
//! source text. The engine is written once against the
//! [`language::LanguageProvider`] capability trait and never inspects which
//! target it is compiling for.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, TypeRef, FunctionSpec, etc.)
//! - [`compile`] - The compilation engine (struct walk, cargs, constraints, outputs)
//! - [`language`] - Target capability traits (LanguageProvider, LanguageCodegen, NamingConvention)
//! - [`model`] - The generic module handed to renderers
//! - [`pipeline`] - Validate/compile phases with plugin hooks and diagnostics
//! - [`scope`] - Collision-free symbol allocation
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod compile;
mod error;
pub mod language;
pub mod model;
pub mod pipeline;
pub mod scope;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{CompileError, Result};
