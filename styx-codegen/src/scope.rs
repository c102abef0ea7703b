//! Collision-free symbol allocation.
//!
//! A [`Scope`] binds rendered names to the entity that requested them.
//! Scopes nest: a child borrows its parent read-only and never picks a
//! name bound anywhere up the chain.
//!
//! Two allocators are provided:
//! - [`Scope::add_or_dodge`] appends `_2`, `_3`, ... until the name is free.
//!   Used for anything derived from descriptor names.
//! - [`Scope::add_or_die`] fails with [`CompileError::NameConflict`]. Used for
//!   infrastructure symbols that generated code references literally.

use indexmap::IndexMap;
use styx_ir::{OutputId, ParamId};

use crate::{CompileError, Result};

/// The entity a symbol is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolOwner {
    /// A keyword, builtin or runtime library name of the target.
    Reserved,
    /// A fixed name generated code refers to (`runner`, `cargs`, `root`, ...).
    Infrastructure,
    /// The static metadata constant.
    Metadata,
    /// Data class generated for a struct parameter (or the root function).
    Type(ParamId),
    /// Output record generated for a struct parameter.
    OutputType(ParamId),
    /// A parameter, or the output field carrying a sub-struct's outputs.
    Param(ParamId),
    /// A declared output or captured stream.
    Output(OutputId),
}

/// A naming scope.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    bindings: IndexMap<String, SymbolOwner>,
}

impl Scope<'static> {
    /// Create an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root scope with the given names bound as [`SymbolOwner::Reserved`].
    pub fn with_reserved<'w>(words: impl IntoIterator<Item = &'w str>) -> Self {
        let mut scope = Self::new();
        for word in words {
            scope.bindings.insert(word.to_string(), SymbolOwner::Reserved);
        }
        scope
    }
}

impl<'p> Scope<'p> {
    /// Create a child scope that sees every binding of `self`.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            parent: Some(self),
            bindings: IndexMap::new(),
        }
    }

    /// Whether `name` is bound here or in any ancestor.
    pub fn contains(&self, name: &str) -> bool {
        self.owner(name).is_some()
    }

    /// The entity `name` is bound to, searching ancestors.
    pub fn owner(&self, name: &str) -> Option<SymbolOwner> {
        match self.bindings.get(name) {
            Some(owner) => Some(*owner),
            None => self.parent.and_then(|p| p.owner(name)),
        }
    }

    /// Bind `name` exactly, or fail if it is taken.
    pub fn add_or_die(&mut self, name: &str, owner: SymbolOwner) -> Result<String> {
        if self.contains(name) {
            return Err(CompileError::NameConflict {
                name: name.to_string(),
            });
        }
        self.bindings.insert(name.to_string(), owner);
        Ok(name.to_string())
    }

    /// Bind `name`, or the first free `name_N` for N = 2, 3, ...
    pub fn add_or_dodge(&mut self, name: &str, owner: SymbolOwner) -> String {
        let mut symbol = name.to_string();
        let mut n = 2;
        while self.contains(&symbol) {
            symbol = format!("{}_{}", name, n);
            n += 1;
        }
        if symbol != name {
            tracing::trace!(requested = name, chosen = %symbol, "dodged symbol collision");
        }
        self.bindings.insert(symbol.clone(), owner);
        symbol
    }

    /// Bindings made directly in this scope, in allocation order.
    pub fn local_symbols(&self) -> impl Iterator<Item = (&str, SymbolOwner)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dodge_returns_requested_name_when_free() {
        let mut scope = Scope::new();
        assert_eq!(scope.add_or_dodge("output", SymbolOwner::Param(ParamId(1))), "output");
    }

    #[test]
    fn test_dodge_appends_increasing_suffix() {
        let mut scope = Scope::new();
        scope.add_or_dodge("output", SymbolOwner::Param(ParamId(1)));
        assert_eq!(scope.add_or_dodge("output", SymbolOwner::Param(ParamId(2))), "output_2");
        assert_eq!(scope.add_or_dodge("output", SymbolOwner::Param(ParamId(3))), "output_3");
        assert_eq!(scope.owner("output_2"), Some(SymbolOwner::Param(ParamId(2))));
    }

    #[test]
    fn test_dodge_skips_taken_suffixes() {
        let mut scope = Scope::new();
        scope.add_or_dodge("x", SymbolOwner::Param(ParamId(1)));
        scope.add_or_dodge("x_2", SymbolOwner::Param(ParamId(2)));
        assert_eq!(scope.add_or_dodge("x", SymbolOwner::Param(ParamId(3))), "x_3");
    }

    #[test]
    fn test_die_on_conflict() {
        let mut scope = Scope::new();
        scope.add_or_die("runner", SymbolOwner::Infrastructure).unwrap();
        let err = scope.add_or_die("runner", SymbolOwner::Infrastructure).unwrap_err();
        assert_eq!(
            err,
            CompileError::NameConflict {
                name: "runner".into()
            }
        );
    }

    #[test]
    fn test_child_dodges_parent_bindings() {
        let mut parent = Scope::with_reserved(["class", "def"]);
        for name in ["runner", "execution", "cargs", "ret"] {
            parent.add_or_die(name, SymbolOwner::Infrastructure).unwrap();
        }

        let mut child = parent.child();
        assert_eq!(child.add_or_dodge("runner", SymbolOwner::Param(ParamId(1))), "runner_2");
        assert_eq!(child.add_or_dodge("class", SymbolOwner::Param(ParamId(2))), "class_2");
        assert_eq!(child.add_or_dodge("input", SymbolOwner::Param(ParamId(3))), "input");
        assert!(child.add_or_die("cargs", SymbolOwner::Infrastructure).is_err());
    }

    #[test]
    fn test_siblings_do_not_see_each_other() {
        let parent = Scope::new();
        let mut a = parent.child();
        a.add_or_dodge("value", SymbolOwner::Param(ParamId(1)));
        let mut b = parent.child();
        assert_eq!(b.add_or_dodge("value", SymbolOwner::Param(ParamId(2))), "value");
    }

    #[test]
    fn test_local_symbols_in_allocation_order() {
        let parent = Scope::with_reserved(["if"]);
        let mut child = parent.child();
        child.add_or_dodge("b", SymbolOwner::Metadata);
        child.add_or_dodge("a", SymbolOwner::Infrastructure);
        let names: Vec<_> = child.local_symbols().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
