//! Compile operation - descriptors to wrapper modules.

use std::path::Path;

use eyre::{Result, eyre};
use styx_codegen::{
    CompileError,
    language::LanguageCodegen,
    pipeline::{CompilationContext, Diagnostic, Pipeline, phases::CompilePhase},
};
use styx_core::{File, WriteResult};

use super::descriptors::{self, DescriptorFile};
use crate::{
    logging::PhaseTracer,
    reports::{CompileReport, CompiledModule, ModuleStatus, SkippedDescriptor},
};

/// Options for the compile operation.
pub struct CompileOptions<'a> {
    pub input_dir: &'a Path,
    /// Modules are printed instead of written when unset.
    pub output_dir: Option<&'a Path>,
    pub dry_run: bool,
    /// Abort on the first failing descriptor.
    pub debug: bool,
}

/// Outcome of compiling one descriptor.
struct Attempt {
    diagnostics: Vec<Diagnostic>,
    source: Result<String>,
}

/// Execute the compile operation.
///
/// Every descriptor is compiled on its own; a failure is recorded in the
/// report and the next descriptor proceeds, unless `debug` is set.
pub fn compile(codegen: &dyn LanguageCodegen, opts: CompileOptions<'_>) -> Result<CompileReport> {
    let pipeline = Pipeline::new()
        .plugin(PhaseTracer)
        .phase(CompilePhase::new(codegen.provider()));
    let mut report = CompileReport::default();

    for descriptor in descriptors::discover(opts.input_dir)? {
        let attempt = compile_descriptor(codegen, &pipeline, &descriptor);
        let source = match attempt.source {
            Ok(source) => source,
            Err(err) if opts.debug => {
                return Err(err.wrap_err(format!("Failed on {}", descriptor.path.display())));
            }
            Err(err) => {
                tracing::warn!(descriptor = %descriptor.path.display(), "skipped");
                report.skipped.push(SkippedDescriptor {
                    descriptor: descriptor.path,
                    detail: failure_detail(&attempt.diagnostics, &err),
                });
                continue;
            }
        };

        report.warnings.extend(
            attempt
                .diagnostics
                .iter()
                .filter(|d| d.severity.is_warning())
                .map(|d| format!("{}: {}", descriptor.path.display(), d.message)),
        );

        let module_path = codegen.module_path(&descriptor.relative);
        let module = match (opts.output_dir, opts.dry_run) {
            (Some(output_dir), false) => {
                let file = File::new(output_dir.join(&module_path), source);
                let status = match file.write() {
                    Ok(WriteResult::Written) => ModuleStatus::Written,
                    Ok(WriteResult::Unchanged) => ModuleStatus::Unchanged,
                    Err(err) if opts.debug => return Err(err),
                    Err(err) => {
                        report.skipped.push(SkippedDescriptor {
                            descriptor: descriptor.path,
                            detail: format!("{:?}", err),
                        });
                        continue;
                    }
                };
                CompiledModule {
                    descriptor: descriptor.path,
                    module: file.path().to_path_buf(),
                    status,
                }
            }
            (output_dir, _) => CompiledModule {
                descriptor: descriptor.path,
                module: output_dir.map_or_else(|| module_path.clone(), |dir| dir.join(&module_path)),
                status: ModuleStatus::Preview(source),
            },
        };
        report.compiled.push(module);
    }

    tracing::info!(
        compiled = report.compiled.len(),
        skipped = report.skipped.len(),
        "compilation finished"
    );
    Ok(report)
}

fn compile_descriptor(
    codegen: &dyn LanguageCodegen,
    pipeline: &Pipeline<'_>,
    descriptor: &DescriptorFile,
) -> Attempt {
    let interface = match descriptors::load(&descriptor.path) {
        Ok(interface) => interface,
        Err(err) => {
            return Attempt {
                diagnostics: Vec::new(),
                source: Err(err),
            };
        }
    };

    let mut ctx = CompilationContext::new(interface);
    let source = pipeline.run_in(&mut ctx).and_then(|()| {
        ctx.take_module()
            .map(|module| codegen.render(&module))
            .ok_or_else(|| eyre!("No module was compiled"))
    });
    Attempt {
        diagnostics: ctx.diagnostics,
        source,
    }
}

/// Error diagnostics followed by the error report.
///
/// Compile errors are rendered through miette to keep their code and help.
fn failure_detail(diagnostics: &[Diagnostic], err: &eyre::Report) -> String {
    let mut lines: Vec<String> = diagnostics
        .iter()
        .filter(|d| d.severity.is_error())
        .map(ToString::to_string)
        .collect();
    match err.downcast_ref::<CompileError>() {
        Some(compile_error) => lines.push(format!("{:?}", miette::Report::new(compile_error.clone()))),
        None => lines.push(format!("{:?}", err)),
    }
    lines.join("\n")
}
