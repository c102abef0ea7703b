//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the compilation pipeline.
///
/// Phases run in order and may read and modify the compilation context,
/// filling in the compiled module or adding diagnostics.
///
/// Built-in phases:
/// - `ValidatePhase` - runs descriptor lints and collects diagnostics
/// - `CompilePhase` - compiles the descriptor for one target language
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// One-line summary shown in debug logs.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
