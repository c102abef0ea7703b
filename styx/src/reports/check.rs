//! Check command report data structures.

use std::path::PathBuf;

use styx_codegen::pipeline::phases::LintInfo;

use super::output::{Output, Report};

/// Diagnostics of one descriptor.
#[derive(Debug)]
pub struct CheckedDescriptor {
    pub path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Report data from validating a descriptor folder.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub descriptors: Vec<CheckedDescriptor>,
}

impl CheckReport {
    pub fn invalid_count(&self) -> usize {
        self.descriptors
            .iter()
            .filter(|d| !d.errors.is_empty())
            .count()
    }

    /// Whether every descriptor passed (warnings allowed).
    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for descriptor in &self.descriptors {
            let path = descriptor.path.display();
            for error in &descriptor.errors {
                out.error(&format!("{}: {}", path, error));
            }
            for warning in &descriptor.warnings {
                out.warning(&format!("{}: {}", path, warning));
            }
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} descriptor(s) valid", self.descriptors.len()));
        } else {
            out.newline();
            out.preformatted(&format!(
                "{}/{} descriptor(s) have errors",
                self.invalid_count(),
                self.descriptors.len()
            ));
        }
    }
}

/// The lints a check runs.
#[derive(Debug)]
pub struct LintsReport {
    pub lints: Vec<LintInfo>,
}

impl Report for LintsReport {
    fn render(&self, out: &mut dyn Output) {
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
    }
}
