//! Compile command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// What happened to a compiled module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    Written,
    /// The file on disk already had this content.
    Unchanged,
    /// Not written; the source is shown instead.
    Preview(String),
}

#[derive(Debug)]
pub struct CompiledModule {
    pub descriptor: PathBuf,
    /// Output path, under the output folder when one is set.
    pub module: PathBuf,
    pub status: ModuleStatus,
}

/// A descriptor that failed to compile.
#[derive(Debug)]
pub struct SkippedDescriptor {
    pub descriptor: PathBuf,
    /// Rendered diagnostics and error report.
    pub detail: String,
}

/// Report data from compiling a descriptor folder.
#[derive(Debug, Default)]
pub struct CompileReport {
    pub compiled: Vec<CompiledModule>,
    pub skipped: Vec<SkippedDescriptor>,
    /// Warnings of descriptors that still compiled.
    pub warnings: Vec<String>,
}

impl CompileReport {
    pub fn total(&self) -> usize {
        self.compiled.len() + self.skipped.len()
    }

    pub fn is_success(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("Compiled {} descriptor(s)", self.compiled.len())
        } else {
            format!(
                "Failed to compile {}/{} descriptor(s)",
                self.skipped.len(),
                self.total()
            )
        }
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for module in &self.compiled {
            match &module.status {
                ModuleStatus::Written => out.added_item(&module.module.display().to_string()),
                ModuleStatus::Unchanged => {
                    out.list_item(&format!("{} (unchanged)", module.module.display()))
                }
                ModuleStatus::Preview(source) => {
                    out.divider(&module.module.display().to_string());
                    out.preformatted(source);
                }
            }
        }

        for skipped in &self.skipped {
            out.preformatted(&format!("Skipped: {}", skipped.descriptor.display()));
            out.preformatted(&skipped.detail);
        }

        out.newline();
        out.preformatted(&self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_summary_counts_failures() {
        let report = CompileReport {
            compiled: vec![CompiledModule {
                descriptor: PathBuf::from("fsl/bet.json"),
                module: PathBuf::from("out/fsl/bet.py"),
                status: ModuleStatus::Written,
            }],
            skipped: vec![SkippedDescriptor {
                descriptor: PathBuf::from("fsl/broken.json"),
                detail: "error: dangling".into(),
            }],
            warnings: Vec::new(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "  + out/fsl/bet.py",
                "Skipped: fsl/broken.json",
                "error: dangling",
                "",
                "Failed to compile 1/2 descriptor(s)",
            ]
        );
    }

    #[test]
    fn test_summary_on_success() {
        let report = CompileReport::default();
        assert!(report.is_success());
        assert_eq!(report.summary(), "Compiled 0 descriptor(s)");
    }
}
