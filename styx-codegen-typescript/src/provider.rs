//! TypeScript emission primitives.

use styx_codegen::{
    builder::Indent,
    compile::{OUTPUT_ROOT, OUTPUTS_METHOD, RUN_METHOD},
    language::{CompareOp, LanguageProvider, LineBuffer, MStr, NamingConvention},
};
use styx_core::quote_string;
use styx_ir::{DefaultValue, Param, ParamBody};

use crate::naming::TS_NAMING;

/// Names the module imports bind.
const RUNTIME_SYMBOLS: &[&str] = &[
    "path",
    "InputPathType",
    "OutputPathType",
    "Runner",
    "Execution",
    "Metadata",
    "StyxValidationError",
    "getGlobalRunner",
];

/// TypeScript literal for a default value.
pub(crate) fn ts_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Bool(v) => v.to_string(),
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Float(v) => v.to_string(),
        DefaultValue::String(s) => quote_string(s),
        DefaultValue::List(items) => {
            let items: Vec<String> = items.iter().map(ts_literal).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Regular expression literal matching `suffix` at the end of a string.
fn suffix_regex(suffix: &str) -> String {
    let mut pattern = String::with_capacity(suffix.len() + 4);
    pattern.push('/');
    for c in suffix.chars() {
        if "\\^$.*+?()[]{}|/".contains(c) {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push_str("$/");
    pattern
}

fn is_simple(expr: &str) -> bool {
    expr.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

fn string_list(values: &[String]) -> DefaultValue {
    DefaultValue::List(values.iter().cloned().map(DefaultValue::String).collect())
}

/// [`LanguageProvider`] emitting TypeScript against `styxdefs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptProvider;

impl TypeScriptProvider {
    pub fn new() -> Self {
        Self
    }

    fn element_mstr(&self, param: &Param, item: &str, execution: &str) -> MStr {
        match &param.body {
            ParamBody::String(_) => MStr::single(item),
            ParamBody::Int(_) | ParamBody::Float(_) => MStr::single(format!("String({})", item)),
            ParamBody::File(file) => {
                let mut options = Vec::new();
                if file.resolve_parent {
                    options.push("resolveParent: true");
                }
                if file.mutable {
                    options.push("mutable: true");
                }
                if options.is_empty() {
                    MStr::single(format!("{}.inputFile({})", execution, item))
                } else {
                    MStr::single(format!(
                        "{}.inputFile({}, {{ {} }})",
                        execution,
                        item,
                        options.join(", ")
                    ))
                }
            }
            ParamBody::Bool(flag) => MStr::list(self.expr_ternary(
                item,
                &ts_literal(&string_list(&flag.value_true)),
                &ts_literal(&string_list(&flag.value_false)),
            )),
            ParamBody::Struct(_) | ParamBody::StructUnion(_) => {
                MStr::list(format!("{}.{}({})", item, RUN_METHOD, execution))
            }
        }
    }

    /// A `const` object literal spanning several lines.
    fn object_literal(&self, head: String, fields: Vec<String>) -> LineBuffer {
        let mut buf = vec![head];
        buf.extend(self.indent().indent_lines(fields));
        buf.push("};".to_string());
        buf
    }
}

impl LanguageProvider for TypeScriptProvider {
    fn naming(&self) -> &NamingConvention {
        &TS_NAMING
    }

    fn runtime_symbols(&self) -> &'static [&'static str] {
        RUNTIME_SYMBOLS
    }

    fn indent(&self) -> Indent {
        Indent::TYPESCRIPT
    }

    fn expr_literal(&self, value: &DefaultValue) -> String {
        ts_literal(value)
    }

    fn expr_null(&self) -> String {
        "null".to_string()
    }

    fn expr_ternary(&self, condition: &str, truthy: &str, falsy: &str) -> String {
        format!("({} ? {} : {})", condition, truthy, falsy)
    }

    fn expr_conditions_join_and(&self, conditions: &[String]) -> String {
        conditions.join(" && ")
    }

    fn expr_conditions_join_or(&self, conditions: &[String]) -> String {
        conditions.join(" || ")
    }

    fn expr_not(&self, condition: &str) -> String {
        if is_simple(condition) {
            format!("!{}", condition)
        } else {
            format!("!({})", condition)
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
        format!("this.{}", symbol)
    }

    fn expr_remove_suffixes(&self, expr: &str, suffixes: &[String]) -> String {
        suffixes.iter().fold(expr.to_string(), |acc, suffix| {
            format!("{}.replace({}, \"\")", acc, suffix_regex(suffix))
        })
    }

    fn expr_path_get_filename(&self, expr: &str) -> String {
        format!("path.basename({})", expr)
    }

    fn expr_numeric_to_str(&self, expr: &str) -> String {
        format!("String({})", expr)
    }

    fn expr_count_true(&self, conditions: &[String]) -> String {
        format!("[{}].filter(Boolean).length", conditions.join(", "))
    }

    fn expr_compare(&self, lhs: &str, op: CompareOp, rhs: &str) -> String {
        let op = match op {
            CompareOp::Eq => "===",
            CompareOp::Ne => "!==",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        };
        format!("{} {} {}", lhs, op, rhs)
    }

    fn expr_len(&self, expr: &str) -> String {
        format!("{}.length", expr)
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
            (_, false) => format!("{}.map(i => {})", symbol, element.expr),
            (_, true) => format!("{}.flatMap(i => {})", symbol, element.expr),
        };
        match &list.join {
            Some(separator) => MStr::single(format!("{}.join({})", words, quote_string(separator))),
            None => MStr::list(words),
        }
    }

    fn param_var_is_set_by_user(&self, param: &Param, symbol: &str) -> Option<String> {
        if param.nullable {
            return Some(format!("{} !== null", symbol));
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
                    format!("{}.join(\"\")", m.expr)
                } else {
                    m.expr.clone()
                }
            })
            .collect();
        MStr::single(self.expr_concat_strs(&parts))
    }

    fn mstr_cargs_add(&self, cargs: &str, mstrs: &[MStr]) -> LineBuffer {
        if mstrs.is_empty() {
            return Vec::new();
        }
        let items: Vec<String> = mstrs
            .iter()
            .map(|m| {
                if m.is_list {
                    format!("...{}", m.expr)
                } else {
                    m.expr.clone()
                }
            })
            .collect();
        vec![format!("{}.push({});", cargs, items.join(", "))]
    }

    fn if_else_block(
        &self,
        condition: &str,
        truthy: LineBuffer,
        falsy: Option<LineBuffer>,
    ) -> LineBuffer {
        let indent = self.indent();
        let mut buf = vec![format!("if ({}) {{", condition)];
        buf.extend(indent.indent_lines(truthy));
        if let Some(falsy) = falsy {
            buf.push("} else {".to_string());
            buf.extend(indent.indent_lines(falsy));
        }
        buf.push("}".to_string());
        buf
    }

    fn raise_constraint_violation(&self, message: &str) -> LineBuffer {
        vec![format!("throw new StyxValidationError({});", quote_string(message))]
    }

    fn return_statement(&self, expr: &str) -> String {
        format!("return {};", expr)
    }

    fn cargs_declare(&self, cargs: &str) -> LineBuffer {
        vec![format!("const {}: string[] = [];", cargs)]
    }

    fn runner_declare(&self, runner: &str) -> LineBuffer {
        vec![format!("{0} = {0} ?? getGlobalRunner();", runner)]
    }

    fn execution_declare(&self, execution: &str, runner: &str, metadata: &str) -> LineBuffer {
        vec![format!(
            "const {} = {}.startExecution({});",
            execution, runner, metadata
        )]
    }

    fn execution_run(
        &self,
        execution: &str,
        cargs: &str,
        ret: &str,
        stdout_field: Option<&str>,
        stderr_field: Option<&str>,
    ) -> LineBuffer {
        let handler = |field: Option<&str>| match field {
            Some(field) => format!("(s: string) => {}.{}.push(s)", ret, field),
            None => "undefined".to_string(),
        };
        let call = match (stdout_field, stderr_field) {
            (None, None) => format!("{}.run({});", execution, cargs),
            (stdout, None) => format!("{}.run({}, {});", execution, cargs, handler(stdout)),
            (stdout, stderr) => format!(
                "{}.run({}, {}, {});",
                execution,
                cargs,
                handler(stdout),
                handler(stderr)
            ),
        };
        vec![call]
    }

    fn resolve_output_file(&self, execution: &str, file_expr: &str) -> String {
        format!("{}.outputFile({})", execution, file_expr)
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
                    &format!("{} in {}", quote_string(OUTPUTS_METHOD), item),
                    &call,
                    "null",
                )
            } else {
                call
            }
        };
        let outputs = if param.is_list() {
            format!("{}.map(i => {})", symbol, collect("i"))
        } else {
            collect(symbol)
        };
        if param.nullable {
            self.expr_ternary(&format!("{} !== null", symbol), &outputs, "null")
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
        let fields = std::iter::once(format!("{}: {},", OUTPUT_ROOT, root))
            .chain(members.iter().map(|(field, value)| format!("{}: {},", field, value)))
            .collect();
        self.object_literal(format!("const {}: {} = {{", ret, output_type), fields)
    }

    fn metadata_declare(&self, symbol: &str, entries: &[(&str, DefaultValue)]) -> LineBuffer {
        let fields = entries
            .iter()
            .map(|(key, value)| format!("{}: {},", key, ts_literal(value)))
            .collect();
        self.object_literal(format!("const {}: Metadata = {{", symbol), fields)
    }

    fn wrapper_module_imports(&self) -> LineBuffer {
        vec![
            "import * as path from \"path\";".to_string(),
            "import {".to_string(),
            "  Execution,".to_string(),
            "  InputPathType,".to_string(),
            "  Metadata,".to_string(),
            "  OutputPathType,".to_string(),
            "  Runner,".to_string(),
            "  StyxValidationError,".to_string(),
            "  getGlobalRunner,".to_string(),
            "} from \"styxdefs\";".to_string(),
        ]
    }
}
