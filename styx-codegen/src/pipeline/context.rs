//! Per-descriptor state threaded through the pipeline phases.

use styx_ir::Interface;

use super::diagnostic::Diagnostic;
use crate::model::GenericModule;

/// One descriptor's compilation, accumulated phase by phase.
///
/// Owned by the caller when driven through [`Pipeline::run_in`](super::Pipeline::run_in),
/// so diagnostics survive a failing phase.
#[derive(Debug)]
pub struct CompilationContext {
    pub interface: Interface,
    /// Set by `CompilePhase`.
    pub module: Option<GenericModule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(interface: Interface) -> Self {
        Self {
            interface,
            module: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn take_module(&mut self) -> Option<GenericModule> {
        self.module.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_fresh_context_is_clean() {
        let mut ctx = CompilationContext::new(fixtures::round_trip());

        assert!(!ctx.has_errors());
        assert!(!ctx.has_warnings());
        assert!(ctx.take_module().is_none());
    }

    #[test]
    fn test_counts_by_severity() {
        let mut ctx = CompilationContext::new(fixtures::round_trip());
        ctx.diagnostics.push(Diagnostic::error("compile", "boom"));
        ctx.diagnostics.push(Diagnostic::warning("validate", "no description"));
        ctx.diagnostics.push(Diagnostic::warning("validate", "no description"));

        assert!(ctx.has_errors());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warnings().count(), 2);
    }
}
