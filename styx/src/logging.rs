//! Log output for the driver.

use eyre::Result;
use styx_codegen::pipeline::{CompilationContext, Plugin};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or
/// everything down to `debug` in debug mode.
pub fn init(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when running under tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Pipeline plugin logging phase boundaries.
pub struct PhaseTracer;

impl Plugin for PhaseTracer {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        tracing::debug!(phase, tool = %ctx.interface.command.name, "phase started");
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        tracing::debug!(
            phase,
            tool = %ctx.interface.command.name,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );
        Ok(())
    }
}
