//! Lint trait for descriptor validation.

use styx_ir::Interface;

use crate::pipeline::Diagnostic;

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A lint that checks a descriptor for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the descriptor and add any diagnostics.
    fn check(&self, interface: &Interface, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
