//! Validate phase: descriptor lints, run before any code is emitted.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{EmptyDescriptionLint, ReferenceLint, TemplateTypeLint};

use crate::pipeline::{CompilationContext, Phase};

/// Runs each lint over the descriptor in order.
///
/// Warnings pass; any error diagnostic fails the phase so compilation never
/// starts on a descriptor the compiler would reject.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// `reference`, `template-type`, `empty-description`.
    pub fn new() -> Self {
        Self::empty()
            .with_lint(ReferenceLint)
            .with_lint(TemplateTypeLint)
            .with_lint(EmptyDescriptionLint)
    }

    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check descriptor integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            let before = ctx.diagnostics.len();
            lint.check(&ctx.interface, &mut ctx.diagnostics);
            tracing::debug!(
                lint = lint.name(),
                findings = ctx.diagnostics.len() - before,
                "lint done"
            );
        }

        match ctx.error_count() {
            0 => Ok(()),
            n => bail!("Validation failed with {} error(s)", n),
        }
    }
}
