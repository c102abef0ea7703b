//! Parameter nodes of the descriptor tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Documentation, StructBody};

/// Stable identifier of a parameter, unique within one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamId(pub u32);

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<DefaultValue>),
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Marks a parameter as a repeated occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSpec {
    pub count_min: Option<u32>,
    pub count_max: Option<u32>,
    /// When set, elements are joined into a single command-line word.
    pub join: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringParam {
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntParam {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub choices: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatParam {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A boolean parameter and the tokens it renders to.
///
/// A plain flag has `value_true = ["--flag"]` and an empty `value_false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolParam {
    pub value_true: Vec<String>,
    pub value_false: Vec<String>,
}

impl BoolParam {
    /// A flag emitting `token` when true and nothing when false.
    pub fn flag(token: impl Into<String>) -> Self {
        Self {
            value_true: vec![token.into()],
            value_false: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParam {
    /// Mount the parent directory instead of the file itself.
    pub resolve_parent: bool,
    /// The tool modifies the file in place.
    pub mutable: bool,
}

/// A discriminated choice among alternative struct parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructUnion {
    pub alts: Vec<Param>,
}

/// Kind of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamBody {
    String(StringParam),
    Int(IntParam),
    Float(FloatParam),
    Bool(BoolParam),
    File(FileParam),
    Struct(StructBody),
    StructUnion(StructUnion),
}

impl ParamBody {
    /// Lowercase kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamBody::String(_) => "string",
            ParamBody::Int(_) => "int",
            ParamBody::Float(_) => "float",
            ParamBody::Bool(_) => "bool",
            ParamBody::File(_) => "file",
            ParamBody::Struct(_) => "struct",
            ParamBody::StructUnion(_) => "struct union",
        }
    }
}

/// A node of the descriptor tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub id: ParamId,
    pub name: String,
    #[serde(default)]
    pub docs: Documentation,
    /// The value may be absent at call time.
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub list: Option<ListSpec>,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    pub body: ParamBody,
}

impl Param {
    pub fn new(id: u32, name: impl Into<String>, body: ParamBody) -> Self {
        Self {
            id: ParamId(id),
            name: name.into(),
            docs: Documentation::default(),
            nullable: false,
            list: None,
            default: None,
            body,
        }
    }

    pub fn string(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, ParamBody::String(StringParam::default()))
    }

    pub fn int(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, ParamBody::Int(IntParam::default()))
    }

    pub fn float(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, ParamBody::Float(FloatParam::default()))
    }

    pub fn file(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, ParamBody::File(FileParam::default()))
    }

    pub fn flag(id: u32, name: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(id, name, ParamBody::Bool(BoolParam::flag(token)))
    }

    pub fn structure(id: u32, name: impl Into<String>, body: StructBody) -> Self {
        Self::new(id, name, ParamBody::Struct(body))
    }

    pub fn union(id: u32, name: impl Into<String>, alts: Vec<Param>) -> Self {
        Self::new(id, name, ParamBody::StructUnion(StructUnion { alts }))
    }

    pub fn doc(mut self, description: impl Into<String>) -> Self {
        self.docs.description = Some(description.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn list(mut self, spec: ListSpec) -> Self {
        self.list = Some(spec);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn is_list(&self) -> bool {
        self.list.is_some()
    }

    /// Struct body, if this is a struct parameter.
    pub fn as_struct(&self) -> Option<&StructBody> {
        match &self.body {
            ParamBody::Struct(body) => Some(body),
            _ => None,
        }
    }

    /// Whether this parameter produces at least one output, transitively.
    ///
    /// A union produces outputs if any of its alternatives does.
    pub fn has_outputs(&self) -> bool {
        match &self.body {
            ParamBody::Struct(body) => body.has_outputs(),
            ParamBody::StructUnion(union) => union.alts.iter().any(Param::has_outputs),
            _ => false,
        }
    }

    /// Direct children in the tree: struct members or union alternatives.
    pub fn children(&self) -> &[Param] {
        match &self.body {
            ParamBody::Struct(body) => &body.params,
            ParamBody::StructUnion(union) => &union.alts,
            _ => &[],
        }
    }

    /// Pre-order depth-first walk over this parameter and all its descendants.
    pub fn iter_params_recursively(&self) -> ParamsRecursive<'_> {
        ParamsRecursive { stack: vec![self] }
    }
}

/// Iterator returned by [`Param::iter_params_recursively`].
pub struct ParamsRecursive<'a> {
    stack: Vec<&'a Param>,
}

impl<'a> Iterator for ParamsRecursive<'a> {
    type Item = &'a Param;

    fn next(&mut self) -> Option<Self::Item> {
        let param = self.stack.pop()?;
        self.stack.extend(param.children().iter().rev());
        Some(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Output, OutputToken};

    fn tree() -> Param {
        let inner = StructBody::default()
            .param(Param::file(3, "input"))
            .output(Output::new(1, "out", vec![OutputToken::literal("x.txt")]));
        let alt_a = Param::structure(5, "alt_a", StructBody::default());
        let alt_b = Param::structure(6, "alt_b", StructBody::default());
        Param::structure(
            1,
            "root",
            StructBody::default()
                .param(Param::string(2, "name"))
                .param(Param::structure(4, "inner", inner))
                .param(Param::union(7, "mode", vec![alt_a, alt_b])),
        )
    }

    #[test]
    fn test_iter_params_recursively_is_preorder() {
        let root = tree();
        let ids: Vec<u32> = root.iter_params_recursively().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 4, 3, 7, 5, 6]);
    }

    #[test]
    fn test_has_outputs_is_transitive() {
        let root = tree();
        assert!(root.has_outputs());
        assert!(!Param::string(1, "x").has_outputs());

        let union = &root.as_struct().unwrap().params[2];
        assert!(!union.has_outputs());
    }

    #[test]
    fn test_union_has_outputs_if_any_alternative_does() {
        let with = Param::structure(
            2,
            "with",
            StructBody::default().output(Output::new(1, "o", vec![OutputToken::literal("o")])),
        );
        let without = Param::structure(3, "without", StructBody::default());
        let union = Param::union(1, "u", vec![without, with]);
        assert!(union.has_outputs());
    }

    #[test]
    fn test_deserialize_param_body_tag() {
        let json = r#"{"id": 4, "name": "threshold", "nullable": true,
            "body": {"type": "float", "min": 0.0, "max": 1.0}}"#;
        let param: Param = serde_json::from_str(json).unwrap();
        assert!(param.nullable);
        assert!(!param.is_list());
        assert_eq!(
            param.body,
            ParamBody::Float(FloatParam {
                min: Some(0.0),
                max: Some(1.0)
            })
        );
    }

    #[test]
    fn test_deserialize_default_values() {
        let values: Vec<DefaultValue> = serde_json::from_str(r#"[true, 3, 0.5, "x", [1, 2]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                DefaultValue::Bool(true),
                DefaultValue::Int(3),
                DefaultValue::Float(0.5),
                DefaultValue::String("x".into()),
                DefaultValue::List(vec![DefaultValue::Int(1), DefaultValue::Int(2)]),
            ]
        );
    }
}
