//! Compile-time errors.

use miette::Diagnostic;
use styx_ir::{OutputId, ParamId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// A fatal error compiling one descriptor.
///
/// No code is emitted for a descriptor that fails with any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    #[error("symbol '{name}' is already bound in this scope")]
    #[diagnostic(
        code(styx::name_conflict),
        help("infrastructure symbols cannot be renamed; rename the conflicting entity")
    )]
    NameConflict { name: String },

    #[error("{kind} parameter '{param}' cannot be substituted into output path '{output}'")]
    #[diagnostic(
        code(styx::unsupported_template_type),
        help("only single string, file, int and float parameters can appear in output path templates")
    )]
    UnsupportedTemplateType {
        output: String,
        param: String,
        kind: String,
    },

    #[error("{context} references unknown parameter id {id}")]
    #[diagnostic(
        code(styx::malformed_reference),
        help("references must point at a parameter declared in the same struct; references to an enclosing struct's parameters are not supported")
    )]
    MalformedReference { context: String, id: ParamId },

    #[error("parameter '{name}' must be a struct")]
    #[diagnostic(
        code(styx::expected_struct),
        help("the root command and every union alternative must be struct parameters")
    )]
    ExpectedStruct { name: String },

    #[error("parameter id {id} is declared more than once")]
    #[diagnostic(code(styx::duplicate_id))]
    DuplicateId { id: ParamId },

    #[error("output id {id} is declared more than once")]
    #[diagnostic(
        code(styx::duplicate_output_id),
        help("every output and captured stdout/stderr stream needs its own id")
    )]
    DuplicateOutputId { id: OutputId },
}

impl From<styx_ir::DuplicateParamId> for CompileError {
    fn from(err: styx_ir::DuplicateParamId) -> Self {
        CompileError::DuplicateId { id: err.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_reference_help_names_enclosing_scope() {
        let err = CompileError::MalformedReference {
            context: "output 'out'".into(),
            id: ParamId(7),
        };

        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("same struct"));
        assert!(help.contains("enclosing struct"));
    }

    #[test]
    fn test_duplicate_output_id_diagnostic() {
        let err = CompileError::DuplicateOutputId { id: OutputId(3) };

        assert_eq!(err.to_string(), "output id 3 is declared more than once");
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("styx::duplicate_output_id")
        );
    }
}
