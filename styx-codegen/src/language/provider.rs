//! The capability set the compilation engine is written against.

use styx_ir::{DefaultValue, Param};

use super::NamingConvention;
use crate::{
    builder::{Indent, TypeMapper},
    scope::Scope,
};

/// Target-language statement lines, each carrying its own nested indentation.
pub type LineBuffer = Vec<String>;

/// An expression evaluating to either one string or a list of strings.
///
/// Command-line words are assembled from these: a list-valued token expands
/// to several words at its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MStr {
    pub expr: String,
    pub is_list: bool,
}

impl MStr {
    pub fn new(expr: impl Into<String>, is_list: bool) -> Self {
        Self {
            expr: expr.into(),
            is_list,
        }
    }

    /// A single-string expression.
    pub fn single(expr: impl Into<String>) -> Self {
        Self::new(expr, false)
    }

    /// A string-list expression.
    pub fn list(expr: impl Into<String>) -> Self {
        Self::new(expr, true)
    }
}

/// Comparison operators used by generated value checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Code-emission primitives of one target language.
///
/// Every method returns target source: expressions as `String`, statements
/// as a [`LineBuffer`]. The compilation engine combines these and never
/// looks at which implementation it holds.
pub trait LanguageProvider: TypeMapper + Send + Sync {
    // =========================================================================
    // Naming
    // =========================================================================

    fn naming(&self) -> &NamingConvention;

    /// Names the runtime library and imports bring into module scope.
    fn runtime_symbols(&self) -> &'static [&'static str];

    /// Indentation used inside emitted blocks.
    fn indent(&self) -> Indent;

    /// Root scope seeded with reserved words and runtime names.
    fn language_base_scope(&self) -> Scope<'static> {
        Scope::with_reserved(
            self.naming()
                .reserved_words
                .iter()
                .chain(self.runtime_symbols())
                .copied(),
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// A literal value (string, number, bool or list of those).
    fn expr_literal(&self, value: &DefaultValue) -> String;

    /// A string literal.
    fn expr_str(&self, value: &str) -> String {
        self.expr_literal(&DefaultValue::String(value.to_string()))
    }

    /// The absent-value sentinel.
    fn expr_null(&self) -> String;

    fn expr_bool(&self, value: bool) -> String {
        self.expr_literal(&DefaultValue::Bool(value))
    }

    fn expr_int(&self, value: i64) -> String {
        self.expr_literal(&DefaultValue::Int(value))
    }

    fn expr_ternary(&self, condition: &str, truthy: &str, falsy: &str) -> String;

    /// Parenthesise a compound expression before nesting it.
    fn expr_parens(&self, expr: &str) -> String {
        format!("({})", expr)
    }

    fn expr_conditions_join_and(&self, conditions: &[String]) -> String;

    fn expr_conditions_join_or(&self, conditions: &[String]) -> String;

    fn expr_not(&self, condition: &str) -> String;

    /// Concatenate single-string expressions into one string.
    fn expr_concat_strs(&self, exprs: &[String]) -> String;

    /// Read a field of the current instance (`self.x`, `this.x`).
    fn expr_access_attr_via_self(&self, symbol: &str) -> String;

    /// Strip the first matching suffix from a string expression.
    fn expr_remove_suffixes(&self, expr: &str, suffixes: &[String]) -> String;

    /// The final path component of a path expression.
    fn expr_path_get_filename(&self, expr: &str) -> String;

    fn expr_numeric_to_str(&self, expr: &str) -> String;

    /// Number of true conditions.
    fn expr_count_true(&self, conditions: &[String]) -> String;

    fn expr_compare(&self, lhs: &str, op: CompareOp, rhs: &str) -> String;

    /// Length of a list expression.
    fn expr_len(&self, expr: &str) -> String;

    /// A fresh empty string list.
    fn expr_empty_str_list(&self) -> String;

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Render a parameter value as command-line word(s), assuming it is set.
    fn param_var_to_mstr(&self, param: &Param, symbol: &str, execution: &str) -> MStr;

    /// Predicate for "the caller provided this parameter".
    ///
    /// `None` when the parameter always contributes (required, non-flag).
    fn param_var_is_set_by_user(&self, param: &Param, symbol: &str) -> Option<String>;

    /// Default value expression of a parameter's argument.
    ///
    /// An explicit default wins; a nullable parameter defaults to null.
    fn param_default_value(&self, param: &Param) -> Option<String> {
        match &param.default {
            Some(value) => Some(self.expr_literal(value)),
            None if param.nullable => Some(self.expr_null()),
            None => None,
        }
    }

    // =========================================================================
    // Command-line words
    // =========================================================================

    /// Empty value of the same shape (`""` or `[]`).
    fn mstr_empty_literal_like(&self, mstr: &MStr) -> String;

    /// Concatenate several values into one word; lists are joined first.
    fn mstr_concat(&self, mstrs: &[MStr]) -> MStr;

    /// Append one or many values to the argument buffer.
    fn mstr_cargs_add(&self, cargs: &str, mstrs: &[MStr]) -> LineBuffer;

    // =========================================================================
    // Statements
    // =========================================================================

    fn if_else_block(
        &self,
        condition: &str,
        truthy: LineBuffer,
        falsy: Option<LineBuffer>,
    ) -> LineBuffer;

    /// Raise the runtime validation error with a literal message.
    fn raise_constraint_violation(&self, message: &str) -> LineBuffer;

    fn return_statement(&self, expr: &str) -> String;

    /// Declare the empty argument buffer.
    fn cargs_declare(&self, cargs: &str) -> LineBuffer;

    /// Fall back to the global runner when none was passed.
    fn runner_declare(&self, runner: &str) -> LineBuffer;

    fn execution_declare(&self, execution: &str, runner: &str, metadata: &str) -> LineBuffer;

    /// Execute the command line, optionally capturing stdout/stderr lines
    /// into the given fields of the output record.
    fn execution_run(
        &self,
        execution: &str,
        cargs: &str,
        ret: &str,
        stdout_field: Option<&str>,
        stderr_field: Option<&str>,
    ) -> LineBuffer;

    /// Turn a relative path expression into an output path.
    fn resolve_output_file(&self, execution: &str, file_expr: &str) -> String;

    /// Outputs of a stored sub-struct instance.
    ///
    /// `may_lack_outputs` is set for unions where some alternative has no
    /// `outputs` method; the expression then yields null for those.
    fn struct_collect_outputs(
        &self,
        param: &Param,
        symbol: &str,
        execution: &str,
        may_lack_outputs: bool,
    ) -> String;

    /// Construct the output record into `ret`.
    fn generate_ret_object_creation(
        &self,
        ret: &str,
        execution: &str,
        output_type: &str,
        members: &[(String, String)],
    ) -> LineBuffer;

    // =========================================================================
    // Module
    // =========================================================================

    /// Declare the static tool metadata constant.
    fn metadata_declare(&self, symbol: &str, entries: &[(&str, DefaultValue)]) -> LineBuffer;

    fn wrapper_module_imports(&self) -> LineBuffer;
}
