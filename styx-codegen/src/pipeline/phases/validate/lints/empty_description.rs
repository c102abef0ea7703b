//! Lint for undocumented tools and outputs.

use styx_ir::{Interface, Param, ParamBody};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about a command, sub-command or output without docs.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn description(&self) -> &'static str {
        "Commands and outputs should be documented"
    }

    fn check(&self, interface: &Interface, diagnostics: &mut Vec<Diagnostic>) {
        check_struct(&interface.command, &interface.command.name, diagnostics);
    }
}

fn check_struct(param: &Param, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let Some(body) = param.as_struct() else {
        return;
    };
    if param.docs.is_empty() {
        diagnostics.push(
            Diagnostic::warning("validate", format!("command '{}' has no description", path))
                .at(path),
        );
    }
    for output in body.outputs.iter().filter(|o| o.docs.is_empty()) {
        diagnostics.push(
            Diagnostic::warning(
                "validate",
                format!("output '{}' has no description", output.name),
            )
            .at(path),
        );
    }
    for child in body.iter_params() {
        let child_path = format!("{}.{}", path, child.name);
        check_struct(child, &child_path, diagnostics);
        if let ParamBody::StructUnion(union) = &child.body {
            for alt in &union.alts {
                check_struct(alt, &format!("{}.{}", child_path, alt.name), diagnostics);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_empty_description() {
        let mut interface = fixtures::round_trip();
        interface.command.docs = Default::default();

        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&interface, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("round_trip"));
        assert!(diagnostics[0].severity.is_warning());
    }

    #[test]
    fn test_has_description() {
        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&fixtures::round_trip(), &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
