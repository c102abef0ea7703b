//! Compilation pipeline for wrapper generation.
//!
//! This module provides a [`Pipeline`] orchestrator running the phases from
//! a parsed descriptor to a compiled module. The pipeline provides:
//!
//! - Explicit phase boundaries (validate → compile)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use styx_codegen::pipeline::{Pipeline, phases::CompilePhase};
//!
//! let pipeline = Pipeline::new().phase(CompilePhase::new(&provider));
//! let mut ctx = pipeline.run(interface)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! let module = ctx.take_module();
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
