//! The backend-neutral output of one compilation.

use crate::builder::{FunctionSpec, StructSpec};

/// One top-level item of a generated module.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A free function (the root command entry point).
    Function(FunctionSpec),
    /// A sub-command type with fields and `run`/`outputs` methods.
    DataClass(StructSpec),
    /// An immutable named-tuple-like record of output paths.
    OutputRecord(StructSpec),
}

impl Item {
    /// Name of the generated function or type.
    pub fn name(&self) -> &str {
        match self {
            Item::Function(f) => &f.name,
            Item::DataClass(s) | Item::OutputRecord(s) => &s.name,
        }
    }
}

/// Functions, classes and records in emission order, plus exports.
///
/// Built incrementally during one depth-first traversal; children always
/// precede the items referencing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericModule {
    /// Import statements, already rendered for the target.
    pub imports: Vec<String>,
    /// Module-level declarations preceding the items (tool metadata).
    pub header: Vec<String>,
    /// Generated items in emission order.
    pub items: Vec<Item>,
    /// Symbols exported from the module.
    pub exports: Vec<String>,
}

impl GenericModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn export(&mut self, symbol: impl Into<String>) {
        self.exports.push(symbol.into());
    }

    /// Position of the item with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name() == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.items.iter().find_map(|item| match item {
            Item::Function(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    pub fn data_class(&self, name: &str) -> Option<&StructSpec> {
        self.items.iter().find_map(|item| match item {
            Item::DataClass(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    pub fn output_record(&self, name: &str) -> Option<&StructSpec> {
        self.items.iter().find_map(|item| match item {
            Item::OutputRecord(s) if s.name == name => Some(s),
            _ => None,
        })
    }
}
