//! Language-agnostic function definitions.
//!
//! This module provides declarative specifications for functions, methods,
//! and their arguments. Bodies are statement lines already produced by a
//! [`LanguageProvider`](crate::language::LanguageProvider); renderers only
//! indent them.

use super::types::TypeRef;

/// A function or constructor argument, also used for data class fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    /// Argument name.
    pub name: String,
    /// Argument type.
    pub ty: TypeRef,
    /// Default value expression, already rendered for the target.
    pub default: Option<String>,
    /// Documentation comment.
    pub doc: Option<String>,
}

impl ArgSpec {
    /// Create a new required argument.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            doc: None,
        }
    }

    /// Set the default value expression.
    pub fn default(mut self, value: Option<String>) -> Self {
        self.default = value;
        self
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Whether the caller may omit this argument.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A declarative specification for a function or method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    /// Function name.
    pub name: String,
    /// Documentation comment.
    pub doc: Option<String>,
    /// Arguments, excluding the receiver.
    pub params: Vec<ArgSpec>,
    /// Return type (None for void).
    pub return_type: Option<TypeRef>,
    /// Documentation of the returned value.
    pub return_doc: Option<String>,
    /// Body as target-language statement lines.
    pub body: Vec<String>,
    /// Whether this is a method (has self/this).
    pub receiver: bool,
}

impl FunctionSpec {
    /// Create a new function spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            return_type: None,
            return_doc: None,
            body: Vec::new(),
            receiver: false,
        }
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a parameter.
    pub fn param(mut self, param: ArgSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Set return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Document the returned value.
    pub fn return_doc(mut self, doc: impl Into<String>) -> Self {
        self.return_doc = Some(doc.into());
        self
    }

    /// Make this a method on its enclosing class.
    pub fn method(mut self) -> Self {
        self.receiver = true;
        self
    }

    /// Append statement lines to the body.
    pub fn extend_body(&mut self, lines: impl IntoIterator<Item = String>) {
        self.body.extend(lines);
    }

    /// Parameters with required ones first, otherwise in declaration order.
    ///
    /// Both Python and TypeScript reject a required argument after an
    /// optional one.
    pub fn ordered_params(&self) -> Vec<&ArgSpec> {
        required_first(&self.params)
    }
}

/// Stable partition of arguments into required then defaulted.
pub(crate) fn required_first(args: &[ArgSpec]) -> Vec<&ArgSpec> {
    let mut ordered: Vec<&ArgSpec> = args.iter().collect();
    ordered.sort_by_key(|a| a.has_default());
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_spec_builder() {
        let spec = FunctionSpec::new("run")
            .method()
            .param(ArgSpec::new("execution", TypeRef::named("Execution")))
            .returns(TypeRef::string_list())
            .doc("Build command-line arguments.");

        assert!(spec.receiver);
        assert_eq!(spec.params.len(), 1);
        assert_eq!(spec.return_type, Some(TypeRef::string_list()));
    }

    #[test]
    fn test_ordered_params_moves_defaults_last() {
        let spec = FunctionSpec::new("bet")
            .param(ArgSpec::new("mask", TypeRef::bool()).default(Some("None".into())))
            .param(ArgSpec::new("infile", TypeRef::string()))
            .param(ArgSpec::new("runner", TypeRef::string()).default(Some("None".into())))
            .param(ArgSpec::new("outfile", TypeRef::string()));

        let names: Vec<_> = spec.ordered_params().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["infile", "outfile", "mask", "runner"]);
    }
}
