//! Struct bodies: command-line groups, constraints and outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Documentation, Param, ParamId};

/// Stable identifier of an output, unique within one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputId(pub u32);

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One token of a command-line word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Literal(String),
    Param(ParamId),
}

/// One command-line word, assembled by concatenating its tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Carg {
    pub tokens: Vec<Token>,
}

impl Carg {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(vec![Token::Literal(text.into())])
    }

    pub fn param(id: u32) -> Self {
        Self::new(vec![Token::Param(ParamId(id))])
    }

    /// Parameters referenced by this word, in token order.
    pub fn param_refs(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Param(id) => Some(*id),
            Token::Literal(_) => None,
        })
    }
}

/// A set of words emitted together.
///
/// The whole group is skipped when an optional parameter it references is
/// unset (e.g. `-o <file>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalGroup {
    pub cargs: Vec<Carg>,
}

impl ConditionalGroup {
    pub fn new(cargs: Vec<Carg>) -> Self {
        Self { cargs }
    }
}

/// Cardinality rule over the "is set" state of a group of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    None,
    ExactlyOne,
    AtMostOne,
    AtLeastOne,
    AllOrNone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConstraint {
    pub kind: Cardinality,
    pub members: Vec<ParamId>,
}

impl GroupConstraint {
    pub fn new(kind: Cardinality, members: impl IntoIterator<Item = u32>) -> Self {
        Self {
            kind,
            members: members.into_iter().map(ParamId).collect(),
        }
    }
}

/// A parameter substituted into an output path template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputParamReference {
    pub id: ParamId,
    /// Suffixes stripped from the value, tried in order (e.g. `.nii.gz`).
    #[serde(default)]
    pub remove_suffixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputToken {
    Literal(String),
    Param(OutputParamReference),
}

impl OutputToken {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn param(id: u32) -> Self {
        Self::Param(OutputParamReference {
            id: ParamId(id),
            remove_suffixes: Vec::new(),
        })
    }

    pub fn param_without(id: u32, suffixes: &[&str]) -> Self {
        Self::Param(OutputParamReference {
            id: ParamId(id),
            remove_suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// A file the tool writes, located by a path template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    #[serde(default)]
    pub docs: Documentation,
    pub tokens: Vec<OutputToken>,
}

impl Output {
    pub fn new(id: u32, name: impl Into<String>, tokens: Vec<OutputToken>) -> Self {
        Self {
            id: OutputId(id),
            name: name.into(),
            docs: Documentation::default(),
            tokens,
        }
    }

    pub fn doc(mut self, description: impl Into<String>) -> Self {
        self.docs.description = Some(description.into());
        self
    }

    /// Parameters referenced by the template, in template order.
    pub fn param_refs(&self) -> impl Iterator<Item = &OutputParamReference> {
        self.tokens.iter().filter_map(|t| match t {
            OutputToken::Param(r) => Some(r),
            OutputToken::Literal(_) => None,
        })
    }
}

/// A command or sub-command's full parameter set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructBody {
    pub params: Vec<Param>,
    pub groups: Vec<ConditionalGroup>,
    pub constraints: Vec<GroupConstraint>,
    pub outputs: Vec<Output>,
}

impl StructBody {
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn group(mut self, cargs: Vec<Carg>) -> Self {
        self.groups.push(ConditionalGroup::new(cargs));
        self
    }

    pub fn constraint(mut self, constraint: GroupConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Immediate child parameters in declaration order.
    pub fn iter_params(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    /// Whether this struct, or anything nested in it, declares an output.
    pub fn has_outputs(&self) -> bool {
        !self.outputs.is_empty() || self.params.iter().any(Param::has_outputs)
    }

    /// Look up an immediate child by id.
    pub fn member(&self, id: ParamId) -> Option<&Param> {
        self.params.iter().find(|p| p.id == id)
    }
}
