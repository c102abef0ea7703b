//! Language-agnostic structure definitions.

use super::function::{ArgSpec, FunctionSpec, required_first};

/// A declarative specification for a data class or output record.
///
/// Represents the *intent* of defining a data structure, independent
/// of any specific language syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSpec {
    /// Struct/class name.
    pub name: String,
    /// Documentation comment.
    pub doc: Option<String>,
    /// Fields, in declaration order.
    pub fields: Vec<ArgSpec>,
    /// Methods, in declaration order.
    pub methods: Vec<FunctionSpec>,
}

impl StructSpec {
    /// Create a new struct spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, field: ArgSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = ArgSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add a method.
    pub fn method(mut self, method: FunctionSpec) -> Self {
        self.methods.push(method);
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&ArgSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a method by name.
    pub fn get_method(&self, name: &str) -> Option<&FunctionSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Fields with required ones first, otherwise in declaration order.
    pub fn ordered_fields(&self) -> Vec<&ArgSpec> {
        required_first(&self.fields)
    }
}
