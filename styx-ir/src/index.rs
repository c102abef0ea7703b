//! Constant-time parameter lookup by id.

use std::collections::HashMap;

use crate::{Param, ParamId};

/// Two nodes of one tree share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("parameter id {0} is declared more than once")]
pub struct DuplicateParamId(pub ParamId);

/// Resolves a [`ParamId`] back to its declaring node anywhere in the tree.
#[derive(Debug, Clone)]
pub struct ParamIndex<'a> {
    params: HashMap<ParamId, &'a Param>,
}

impl<'a> ParamIndex<'a> {
    /// Index `root` and every parameter nested below it.
    pub fn new(root: &'a Param) -> Result<Self, DuplicateParamId> {
        let mut params = HashMap::new();
        for param in root.iter_params_recursively() {
            if params.insert(param.id, param).is_some() {
                return Err(DuplicateParamId(param.id));
            }
        }
        Ok(Self { params })
    }

    pub fn get(&self, id: ParamId) -> Option<&'a Param> {
        self.params.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StructBody;

    #[test]
    fn test_index_resolves_nested_params() {
        let inner = StructBody::default().param(Param::int(3, "level"));
        let root = Param::structure(
            1,
            "root",
            StructBody::default()
                .param(Param::string(2, "name").nullable())
                .param(Param::structure(4, "inner", inner)),
        );

        let index = ParamIndex::new(&root).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get(ParamId(3)).unwrap().name, "level");
        assert!(index.get(ParamId(2)).unwrap().nullable);
        assert!(index.get(ParamId(99)).is_none());
    }

    #[test]
    fn test_index_rejects_duplicate_ids() {
        let root = Param::structure(
            1,
            "root",
            StructBody::default()
                .param(Param::string(2, "a"))
                .param(Param::string(2, "b")),
        );
        assert_eq!(ParamIndex::new(&root).unwrap_err(), DuplicateParamId(ParamId(2)));
    }
}
