//! Check operation - descriptor validation.

use std::path::Path;

use eyre::Result;
use styx_codegen::pipeline::{CompilationContext, Diagnostic, Pipeline, phases::ValidatePhase};

use super::descriptors;
use crate::{
    logging::PhaseTracer,
    reports::{CheckReport, CheckedDescriptor, LintsReport},
};

/// Lints run by the validate phase, in order.
pub fn list_lints() -> LintsReport {
    LintsReport {
        lints: ValidatePhase::new().lint_info(),
    }
}

/// Execute the check operation.
///
/// Runs the validation lints over every descriptor under `input_dir`
/// without compiling anything.
pub fn check(input_dir: &Path) -> Result<CheckReport> {
    let pipeline = Pipeline::new().plugin(PhaseTracer);
    let mut report = CheckReport::default();

    for descriptor in descriptors::discover(input_dir)? {
        let checked = match descriptors::load(&descriptor.path) {
            Ok(interface) => {
                let mut ctx = CompilationContext::new(interface);
                let validated = pipeline.run_in(&mut ctx);
                tracing::debug!(
                    descriptor = %descriptor.path.display(),
                    valid = validated.is_ok(),
                    "checked"
                );
                CheckedDescriptor {
                    path: descriptor.path,
                    errors: ctx.errors().map(Diagnostic::summary).collect(),
                    warnings: ctx.warnings().map(Diagnostic::summary).collect(),
                }
            }
            Err(err) => CheckedDescriptor {
                path: descriptor.path,
                errors: vec![format!("{:#}", err)],
                warnings: Vec::new(),
            },
        };
        report.descriptors.push(checked);
    }

    Ok(report)
}
