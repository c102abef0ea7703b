//! Lint for output templates substituting unsupported parameter kinds.

use styx_ir::Interface;

use super::super::Lint;
use crate::{compile::validate, pipeline::Diagnostic};

pub struct TemplateTypeLint;

impl Lint for TemplateTypeLint {
    fn name(&self) -> &'static str {
        "template-type"
    }

    fn description(&self) -> &'static str {
        "Output paths may only substitute single string, file or numeric parameters"
    }

    fn check(&self, interface: &Interface, diagnostics: &mut Vec<Diagnostic>) {
        if !validate::structure_errors(interface).is_empty() {
            return;
        }
        diagnostics.extend(validate::template_errors(interface).iter().map(Diagnostic::from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_flag_in_output_path() {
        let mut diagnostics = Vec::new();
        TemplateTypeLint.check(&fixtures::flag_in_output_path(), &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "bool parameter 'verbose' cannot be substituted into output path 'log'"
        );
    }

    #[test]
    fn test_supported_templates() {
        let mut diagnostics = Vec::new();
        TemplateTypeLint.check(&fixtures::round_trip(), &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
