//! Hooks around pipeline phases.

use eyre::Result;

use super::CompilationContext;

/// Observer called around every phase of a [`Pipeline`](super::Pipeline).
///
/// An error from either hook aborts the run with that error; diagnostics
/// already in the context are kept.
///
/// ```ignore
/// /// Refuse descriptors that produce any warning.
/// struct DenyWarnings;
///
/// impl Plugin for DenyWarnings {
///     fn name(&self) -> &'static str { "deny-warnings" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         match ctx.has_warnings() {
///             true => eyre::bail!("{phase} reported warnings"),
///             false => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Only called when the phase succeeded.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
