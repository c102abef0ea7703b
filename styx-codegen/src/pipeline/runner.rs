//! Pipeline orchestrator.

use eyre::Result;
use styx_ir::Interface;

use super::{CompilationContext, Phase, Plugin, phases::ValidatePhase};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in validate phase followed by any added phases, calling
/// plugin hooks before and after each one.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(MyPlugin::new())
///     .phase(CompilePhase::new(&provider));
///
/// let ctx = pipeline.run(interface)?;
/// ```
pub struct Pipeline<'a> {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase + 'a>>,
    plugins: Vec<Box<dyn Plugin + 'a>>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline running only the default validation.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the built-in validate phase (e.g. to add or drop lints).
    pub fn validate_with(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after validation.
    pub fn phase(mut self, phase: impl Phase + 'a) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'a) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on one descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin hook fails fatally.
    pub fn run(&self, interface: Interface) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(interface);
        self.run_in(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on a caller-owned context.
    ///
    /// Diagnostics collected before a failing phase stay in `ctx`.
    pub fn run_in(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.run_phase(&self.validate, ctx)?;
        for phase in &self.phases {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, description = phase.description(), "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{pipeline::Diagnostic, testing::fixtures};

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct MarkPhase;

    impl Phase for MarkPhase {
        fn name(&self) -> &'static str {
            "mark"
        }

        fn description(&self) -> &'static str {
            "Record a warning"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            ctx.diagnostics.push(Diagnostic::warning("mark", "ran"));
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .phase(MarkPhase)
            .run(fixtures::round_trip())
            .expect("pipeline should succeed");

        assert!(!ctx.has_errors());
        assert!(ctx.diagnostics.iter().any(|d| d.phase == "mark"));
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin).phase(MarkPhase);
        let _ = pipeline
            .run(fixtures::round_trip())
            .expect("pipeline should succeed");

        // validate + mark
        assert_eq!(before_count.load(Ordering::SeqCst), 2);
        assert_eq!(after_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_run_in_keeps_diagnostics_on_failure() {
        let mut ctx = CompilationContext::new(fixtures::dangling_reference());
        let result = Pipeline::new().phase(MarkPhase).run_in(&mut ctx);

        assert!(result.is_err());
        assert_eq!(ctx.error_count(), 1);
        assert!(!ctx.diagnostics.iter().any(|d| d.phase == "mark"));
    }

    #[test]
    fn test_validate_with_replaces_lints() {
        let mut interface = fixtures::round_trip();
        interface.command.docs = Default::default();

        let ctx = Pipeline::new()
            .validate_with(ValidatePhase::empty())
            .run(interface)
            .expect("no lints, no findings");

        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_pipeline_stops_on_invalid_descriptor() {
        let pipeline = Pipeline::new().phase(MarkPhase);
        let err = pipeline.run(fixtures::dangling_reference()).unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }
}
