//! Python emission primitives.

use styx_codegen::{
    builder::Indent,
    compile::{OUTPUT_ROOT, OUTPUTS_METHOD, RUN_METHOD},
    language::{CompareOp, LanguageProvider, LineBuffer, MStr, NamingConvention},
};
use styx_core::quote_string;
use styx_ir::{DefaultValue, Param, ParamBody};

use crate::naming::PY_NAMING;

/// Names `from styxdefs import *` and the module imports bind.
const RUNTIME_SYMBOLS: &[&str] = &[
    "typing",
    "pathlib",
    "dataclasses",
    "InputPathType",
    "OutputPathType",
    "Runner",
    "Execution",
    "Metadata",
    "StyxValidationError",
    "get_global_runner",
];

/// Python literal for a default value.
pub(crate) fn python_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Bool(true) => "True".to_string(),
        DefaultValue::Bool(false) => "False".to_string(),
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Float(v) => float_literal(*v),
        DefaultValue::String(s) => quote_string(s),
        DefaultValue::List(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn float_literal(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

/// A bare name or attribute access, safe to use without parentheses.
fn is_simple(expr: &str) -> bool {
    expr.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// [`LanguageProvider`] emitting Python 3.10+ against `styxdefs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonProvider;

impl PythonProvider {
    pub fn new() -> Self {
        Self
    }

    /// Word(s) for one element of a parameter.
    fn element_mstr(&self, param: &Param, item: &str, execution: &str) -> MStr {
        match &param.body {
            ParamBody::String(_) => MStr::single(item),
            ParamBody::Int(_) | ParamBody::Float(_) => MStr::single(format!("str({})", item)),
            ParamBody::File(file) => {
                let mut args = vec![item.to_string()];
                if file.resolve_parent {
                    args.push("resolve_parent=True".to_string());
                }
                if file.mutable {
                    args.push("mutable=True".to_string());
                }
                MStr::single(format!("{}.input_file({})", execution, args.join(", ")))
            }
            ParamBody::Bool(flag) => MStr::list(self.expr_ternary(
                item,
                &python_literal(&string_list(&flag.value_true)),
                &python_literal(&string_list(&flag.value_false)),
            )),
            ParamBody::Struct(_) | ParamBody::StructUnion(_) => {
                MStr::list(format!("{}.{}({})", item, RUN_METHOD, execution))
            }
        }
    }
}

fn string_list(values: &[String]) -> DefaultValue {
    DefaultValue::List(values.iter().cloned().map(DefaultValue::String).collect())
}

impl LanguageProvider for PythonProvider {
    fn naming(&self) -> &NamingConvention {
        &PY_NAMING
    }

    fn runtime_symbols(&self) -> &'static [&'static str] {
        RUNTIME_SYMBOLS
    }

    fn indent(&self) -> Indent {
        Indent::PYTHON
    }

    fn expr_literal(&self, value: &DefaultValue) -> String {
        python_literal(value)
    }

    fn expr_null(&self) -> String {
        "None".to_string()
    }

    fn expr_ternary(&self, condition: &str, truthy: &str, falsy: &str) -> String {
        format!("({} if {} else {})", truthy, condition, falsy)
    }

    fn expr_conditions_join_and(&self, conditions: &[String]) -> String {
        conditions.join(" and ")
    }

    fn expr_conditions_join_or(&self, conditions: &[String]) -> String {
        conditions.join(" or ")
    }

    fn expr_not(&self, condition: &str) -> String {
        if is_simple(condition) {
            format!("not {}", condition)
        } else {
            format!("not ({})", condition)
        }
    }

    fn expr_concat_strs(&self, exprs: &[String]) -> String {
        if exprs.is_empty() {
            quote_string("")
        } else {
            exprs.join(" + ")
        }
    }

    fn expr_access_attr_via_self(&self, symbol: &str) -> String {
        format!("self.{}", symbol)
    }

    fn expr_remove_suffixes(&self, expr: &str, suffixes: &[String]) -> String {
        suffixes.iter().fold(expr.to_string(), |acc, suffix| {
            format!("{}.removesuffix({})", acc, quote_string(suffix))
        })
    }

    fn expr_path_get_filename(&self, expr: &str) -> String {
        format!("pathlib.Path({}).name", expr)
    }

    fn expr_numeric_to_str(&self, expr: &str) -> String {
        format!("str({})", expr)
    }

    fn expr_count_true(&self, conditions: &[String]) -> String {
        format!("[{}].count(True)", conditions.join(", "))
    }

    fn expr_compare(&self, lhs: &str, op: CompareOp, rhs: &str) -> String {
        let op = match op {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        };
        format!("{} {} {}", lhs, op, rhs)
    }

    fn expr_len(&self, expr: &str) -> String {
        format!("len({})", expr)
    }

    fn expr_empty_str_list(&self) -> String {
        "[]".to_string()
    }

    fn param_var_to_mstr(&self, param: &Param, symbol: &str, execution: &str) -> MStr {
        let Some(list) = &param.list else {
            return self.element_mstr(param, symbol, execution);
        };

        let element = self.element_mstr(param, "i", execution);
        let words = match (&param.body, element.is_list) {
            (ParamBody::String(_), _) => symbol.to_string(),
            (_, false) => format!("[{} for i in {}]", element.expr, symbol),
            (_, true) => format!("[a for i in {} for a in {}]", symbol, element.expr),
        };
        match &list.join {
            Some(separator) => MStr::single(format!("{}.join({})", quote_string(separator), words)),
            None => MStr::list(words),
        }
    }

    fn param_var_is_set_by_user(&self, param: &Param, symbol: &str) -> Option<String> {
        if param.nullable {
            return Some(format!("{} is not None", symbol));
        }
        match &param.body {
            ParamBody::Bool(flag) if !param.is_list() => {
                match (flag.value_true.is_empty(), flag.value_false.is_empty()) {
                    (false, true) => Some(symbol.to_string()),
                    (true, false) => Some(self.expr_not(symbol)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn mstr_empty_literal_like(&self, mstr: &MStr) -> String {
        if mstr.is_list {
            "[]".to_string()
        } else {
            quote_string("")
        }
    }

    fn mstr_concat(&self, mstrs: &[MStr]) -> MStr {
        let parts: Vec<String> = mstrs
            .iter()
            .map(|m| {
                if m.is_list {
                    format!("\"\".join({})", m.expr)
                } else {
                    m.expr.clone()
                }
            })
            .collect();
        MStr::single(self.expr_concat_strs(&parts))
    }

    fn mstr_cargs_add(&self, cargs: &str, mstrs: &[MStr]) -> LineBuffer {
        match mstrs {
            [] => Vec::new(),
            [single] if single.is_list => vec![format!("{}.extend({})", cargs, single.expr)],
            [single] => vec![format!("{}.append({})", cargs, single.expr)],
            many => {
                let items: Vec<String> = many
                    .iter()
                    .map(|m| {
                        if m.is_list {
                            format!("*{}", m.expr)
                        } else {
                            m.expr.clone()
                        }
                    })
                    .collect();
                vec![format!("{}.extend([{}])", cargs, items.join(", "))]
            }
        }
    }

    fn if_else_block(
        &self,
        condition: &str,
        truthy: LineBuffer,
        falsy: Option<LineBuffer>,
    ) -> LineBuffer {
        let indent = self.indent();
        let mut buf = vec![format!("if {}:", condition)];
        buf.extend(indent.indent_lines(non_empty_block(truthy)));
        if let Some(falsy) = falsy {
            buf.push("else:".to_string());
            buf.extend(indent.indent_lines(non_empty_block(falsy)));
        }
        buf
    }

    fn raise_constraint_violation(&self, message: &str) -> LineBuffer {
        vec![format!("raise StyxValidationError({})", quote_string(message))]
    }

    fn return_statement(&self, expr: &str) -> String {
        format!("return {}", expr)
    }

    fn cargs_declare(&self, cargs: &str) -> LineBuffer {
        vec![format!("{} = []", cargs)]
    }

    fn runner_declare(&self, runner: &str) -> LineBuffer {
        vec![format!("{0} = {0} or get_global_runner()", runner)]
    }

    fn execution_declare(&self, execution: &str, runner: &str, metadata: &str) -> LineBuffer {
        vec![format!("{} = {}.start_execution({})", execution, runner, metadata)]
    }

    fn execution_run(
        &self,
        execution: &str,
        cargs: &str,
        ret: &str,
        stdout_field: Option<&str>,
        stderr_field: Option<&str>,
    ) -> LineBuffer {
        let handlers = [("handle_stdout", stdout_field), ("handle_stderr", stderr_field)];
        let handlers: Vec<String> = handlers
            .into_iter()
            .filter_map(|(name, field)| {
                field.map(|field| format!("{}=lambda s: {}.{}.append(s),", name, ret, field))
            })
            .collect();
        if handlers.is_empty() {
            return vec![format!("{}.run({})", execution, cargs)];
        }
        let indent = self.indent();
        let mut buf = vec![format!("{}.run(", execution)];
        buf.extend(indent.indent_lines(
            std::iter::once(format!("{},", cargs)).chain(handlers).collect(),
        ));
        buf.push(")".to_string());
        buf
    }

    fn resolve_output_file(&self, execution: &str, file_expr: &str) -> String {
        format!("{}.output_file({})", execution, file_expr)
    }

    fn struct_collect_outputs(
        &self,
        param: &Param,
        symbol: &str,
        execution: &str,
        may_lack_outputs: bool,
    ) -> String {
        let collect = |item: &str| {
            let call = format!("{}.{}({})", item, OUTPUTS_METHOD, execution);
            if may_lack_outputs {
                self.expr_ternary(
                    &format!("hasattr({}, {})", item, quote_string(OUTPUTS_METHOD)),
                    &call,
                    "None",
                )
            } else {
                call
            }
        };
        let outputs = if param.is_list() {
            format!("[{} for i in {}]", collect("i"), symbol)
        } else {
            collect(symbol)
        };
        if param.nullable {
            self.expr_ternary(&format!("{} is not None", symbol), &outputs, "None")
        } else {
            outputs
        }
    }

    fn generate_ret_object_creation(
        &self,
        ret: &str,
        execution: &str,
        output_type: &str,
        members: &[(String, String)],
    ) -> LineBuffer {
        let root = self.resolve_output_file(execution, &quote_string("."));
        let fields = std::iter::once(format!("{}={},", OUTPUT_ROOT, root))
            .chain(members.iter().map(|(field, value)| format!("{}={},", field, value)))
            .collect();

        let mut buf = vec![format!("{} = {}(", ret, output_type)];
        buf.extend(self.indent().indent_lines(fields));
        buf.push(")".to_string());
        buf
    }

    fn metadata_declare(&self, symbol: &str, entries: &[(&str, DefaultValue)]) -> LineBuffer {
        let fields = entries
            .iter()
            .map(|(key, value)| format!("{}={},", key, python_literal(value)))
            .collect();

        let mut buf = vec![format!("{} = Metadata(", symbol)];
        buf.extend(self.indent().indent_lines(fields));
        buf.push(")".to_string());
        buf
    }

    fn wrapper_module_imports(&self) -> LineBuffer {
        vec![
            "import dataclasses".to_string(),
            "import pathlib".to_string(),
            "import typing".to_string(),
            String::new(),
            "from styxdefs import *".to_string(),
        ]
    }
}

fn non_empty_block(lines: LineBuffer) -> LineBuffer {
    if lines.is_empty() {
        vec!["pass".to_string()]
    } else {
        lines
    }
}
