//! Lint for broken tree structure and dangling references.

use styx_ir::Interface;

use super::super::Lint;
use crate::{compile::validate, pipeline::Diagnostic};

/// Lint that reports references the compiler cannot resolve.
///
/// Covers non-struct roots and union alternatives, duplicate ids, and
/// command-line, constraint or output references to parameters outside the
/// enclosing struct.
pub struct ReferenceLint;

impl Lint for ReferenceLint {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn description(&self) -> &'static str {
        "Parameter references must resolve within their struct"
    }

    fn check(&self, interface: &Interface, diagnostics: &mut Vec<Diagnostic>) {
        let structure = validate::structure_errors(interface);
        if !structure.is_empty() {
            diagnostics.extend(structure.iter().map(Diagnostic::from));
            return;
        }
        diagnostics.extend(
            validate::reference_errors(interface)
                .iter()
                .map(|err| Diagnostic::from(err).at(&interface.command.name)),
        );
    }
}
