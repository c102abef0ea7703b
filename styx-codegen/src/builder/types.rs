//! Language-agnostic type system for code generation.
//!
//! This module provides abstractions for representing types in a way that
//! can be rendered to any target language via the [`TypeMapper`] trait.

use styx_ir::DefaultValue;

/// A language-agnostic type reference.
///
/// Types are represented semantically and can be rendered differently
/// per target language.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A primitive type (string, int, input path, runner, etc.).
    Primitive(PrimitiveType),
    /// An optional/nullable type.
    Optional(Box<TypeRef>),
    /// An array/list type.
    Array(Box<TypeRef>),
    /// A generated type (data class or output record).
    Named(String),
    /// A union of two or more types.
    Union(Vec<TypeRef>),
    /// A union of literal values (parameter choices).
    Literal(Vec<DefaultValue>),
}

impl TypeRef {
    /// Create an optional type reference.
    ///
    /// Optional types do not nest: `optional(optional(T))` is `optional(T)`.
    pub fn optional(inner: TypeRef) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Create an array type reference.
    pub fn array(inner: TypeRef) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a union type, collapsing duplicates and single-member unions.
    pub fn union(members: impl IntoIterator<Item = TypeRef>) -> Self {
        let mut unique: Vec<TypeRef> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        if unique.len() == 1 {
            unique.remove(0)
        } else {
            Self::Union(unique)
        }
    }

    /// Convenience: String type.
    pub fn string() -> Self {
        Self::Primitive(PrimitiveType::String)
    }

    /// Convenience: Int type.
    pub fn int() -> Self {
        Self::Primitive(PrimitiveType::Int)
    }

    /// Convenience: Float type.
    pub fn float() -> Self {
        Self::Primitive(PrimitiveType::Float)
    }

    /// Convenience: Bool type.
    pub fn bool() -> Self {
        Self::Primitive(PrimitiveType::Bool)
    }

    /// Convenience: list of strings (the command line, captured stdout).
    pub fn string_list() -> Self {
        Self::array(Self::string())
    }

    /// Check if this type is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

/// Primitive types supported across languages.
///
/// Besides scalars this covers the handle types of the runtime library
/// generated code links against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Int,
    Float,
    Bool,
    /// A file passed into the tool.
    InputPath,
    /// A file the tool produces, resolved by the execution.
    OutputPath,
    Runner,
    Execution,
}

/// Trait for rendering [`TypeRef`] to language-specific type strings.
///
/// Implement this trait for each target language.
pub trait TypeMapper {
    /// Map a primitive type to the target language.
    fn map_primitive(&self, ty: PrimitiveType) -> String;

    /// Map an optional type (e.g., `T | None`, `T | null`).
    fn map_optional(&self, inner: &str) -> String;

    /// Map an array type (e.g., `list[T]`, `T[]`).
    fn map_array(&self, inner: &str) -> String;

    /// Map a union of rendered member types.
    fn map_union(&self, members: &[String]) -> String;

    /// Map a union of literal values.
    fn map_literal(&self, values: &[DefaultValue]) -> String;

    /// Render a complete TypeRef to a string.
    fn render_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => self.map_primitive(*p),
            TypeRef::Optional(inner) => {
                let inner_str = self.render_type(inner);
                self.map_optional(&inner_str)
            }
            TypeRef::Array(inner) => {
                let inner_str = self.render_type(inner);
                self.map_array(&inner_str)
            }
            TypeRef::Named(name) => name.clone(),
            TypeRef::Union(members) => {
                let rendered: Vec<_> = members.iter().map(|m| self.render_type(m)).collect();
                self.map_union(&rendered)
            }
            TypeRef::Literal(values) => self.map_literal(values),
        }
    }
}
