//! Diagnostics collected while a descriptor moves through the pipeline.

use std::fmt;

use serde::Serialize;

use crate::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The descriptor cannot be compiled.
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// One finding about a descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Phase that reported it.
    pub phase: String,
    /// Error code, e.g. `styx::malformed_reference`.
    pub code: Option<String>,
    pub message: String,
    /// Dotted path of the descriptor node (e.g. "bet.mask_opts.threshold").
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase.into(), message.into())
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase.into(), message.into())
    }

    fn new(severity: Severity, phase: String, message: String) -> Self {
        Self {
            severity,
            phase,
            code: None,
            message,
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The message with its code and location, without the severity.
    pub fn summary(&self) -> String {
        let mut text = match &self.code {
            Some(code) => format!("[{}] {}", code, self.message),
            None => self.message.clone(),
        };
        if let Some(location) = &self.location {
            text.push_str(&format!(" (at {})", location));
        }
        text
    }
}

impl From<&CompileError> for Diagnostic {
    fn from(err: &CompileError) -> Self {
        let mut diagnostic = Diagnostic::error("validate", err.to_string());
        diagnostic.code = miette::Diagnostic::code(err).map(|code| code.to_string());
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary())
    }
}

#[cfg(test)]
mod tests {
    use styx_ir::ParamId;

    use super::*;

    #[test]
    fn test_warning_display_with_location() {
        let diag = Diagnostic::warning("validate", "missing description").at("bet.mask");
        assert_eq!(diag.to_string(), "warning: missing description (at bet.mask)");
    }

    #[test]
    fn test_compile_error_keeps_code() {
        let diag = Diagnostic::from(&CompileError::DuplicateId { id: ParamId(3) });

        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "validate");
        assert_eq!(diag.code.as_deref(), Some("styx::duplicate_id"));
        assert_eq!(
            diag.summary(),
            "[styx::duplicate_id] parameter id 3 is declared more than once"
        );
    }
}
