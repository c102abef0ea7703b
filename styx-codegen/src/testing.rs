//! Test utilities for backends.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use eyre::Result;

/// Failure reported by a [`CompileChecker`].
#[derive(Debug)]
pub struct CheckFailure {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CheckFailure {}

/// Trait for verifying generated code parses/type-checks.
pub trait CompileChecker {
    /// Check the generated file at `path`.
    fn check(&self, path: &Path) -> Result<(), CheckFailure>;
}

fn run_checker(mut command: Command, label: &str) -> Result<(), CheckFailure> {
    let output = command.output().map_err(|e| CheckFailure {
        message: format!("Failed to run {}: {}", label, e),
        output: String::new(),
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Err(CheckFailure {
            message: format!("{} failed", label),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// Python syntax checker using `python3 -m py_compile`.
pub struct PythonChecker;

impl CompileChecker for PythonChecker {
    fn check(&self, path: &Path) -> Result<(), CheckFailure> {
        let mut command = Command::new("python3");
        command.args(["-m", "py_compile"]).arg(path);
        run_checker(command, "python3 -m py_compile")
    }
}

/// TypeScript checker using `tsc --noEmit`.
pub struct TypeScriptChecker;

impl CompileChecker for TypeScriptChecker {
    fn check(&self, path: &Path) -> Result<(), CheckFailure> {
        let mut command = Command::new("npx");
        command.args(["tsc", "--noEmit", "--skipLibCheck"]).arg(path);
        run_checker(command, "tsc --noEmit")
    }
}

/// Write `content` under a temporary directory and check it.
///
/// The directory is cleaned up when the returned `TempDir` is dropped.
pub fn check_in_temp<C: CompileChecker>(
    checker: &C,
    file_name: &str,
    content: &str,
) -> Result<tempfile::TempDir> {
    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join(file_name);
    std::fs::write(&path, content)?;
    checker.check(&path)?;
    Ok(temp_dir)
}

/// Descriptors shared by engine and backend tests.
pub mod fixtures {
    use styx_ir::{
        Cardinality, Carg, Documentation, GroupConstraint, IntParam, Interface, ListSpec, Output,
        OutputId, OutputToken, Package, Param, ParamBody, ParamId, StdStreamOutput, StructBody, Token,
    };

    /// Wrap a root body into a documented interface.
    pub fn interface(name: &str, body: StructBody) -> Interface {
        Interface {
            uid: format!("{name}.uid"),
            package: Package {
                name: "styx-tests".into(),
                version: Some("1.0".into()),
                docker: None,
                docs: Documentation::default(),
            },
            command: Param::structure(0, name, body).doc(format!("Run {name}.")),
            stdout_as_string_output: None,
            stderr_as_string_output: None,
        }
    }

    /// Required `name`, optional flag `verbose`, output `{name}.out`.
    pub fn round_trip() -> Interface {
        let body = StructBody::default()
            .param(Param::string(1, "name").doc("Job name."))
            .param(Param::flag(2, "verbose", "-v").nullable())
            .group(vec![Carg::literal("round_trip")])
            .group(vec![Carg::param(2)])
            .group(vec![Carg::param(1)])
            .output(
                Output::new(
                    1,
                    "out",
                    vec![OutputToken::param(1), OutputToken::literal(".out")],
                )
                .doc("Result file."),
            );
        interface("round_trip", body)
    }

    /// Union `mode` where only the `fast` alternative declares outputs.
    pub fn nested_union() -> Interface {
        let fast = StructBody::default()
            .param(Param::file(3, "input"))
            .group(vec![Carg::literal("fast")])
            .group(vec![Carg::param(3)])
            .output(
                Output::new(
                    1,
                    "result",
                    vec![
                        OutputToken::param_without(3, &[".nii.gz", ".nii"]),
                        OutputToken::literal("_fast.nii.gz"),
                    ],
                )
                .doc("Fast result."),
            );
        let slow = StructBody::default()
            .param(Param::int(5, "iterations"))
            .group(vec![Carg::literal("slow")])
            .group(vec![Carg::param(5)]);
        let body = StructBody::default()
            .param(Param::union(
                1,
                "mode",
                vec![
                    Param::structure(2, "fast", fast).doc("Fast mode."),
                    Param::structure(4, "slow", slow).doc("Slow mode."),
                ],
            ))
            .group(vec![Carg::literal("nested")])
            .group(vec![Carg::param(1)]);
        interface("nested", body)
    }

    /// A struct member and a list of structs, both with outputs.
    pub fn nested_struct() -> Interface {
        let roi = StructBody::default()
            .param(Param::string(11, "label"))
            .group(vec![Carg::literal("--roi"), Carg::param(11)])
            .output(Output::new(
                2,
                "mask",
                vec![OutputToken::param(11), OutputToken::literal("_mask.nii")],
            ));
        let opts = StructBody::default()
            .param(Param::float(21, "threshold").nullable())
            .group(vec![Carg::literal("-t"), Carg::param(21)]);
        let body = StructBody::default()
            .param(
                Param::structure(1, "roi", roi)
                    .list(ListSpec::default())
                    .doc("Regions of interest."),
            )
            .param(Param::structure(2, "opts", opts).nullable())
            .group(vec![Carg::literal("tool")])
            .group(vec![Carg::param(2)])
            .group(vec![Carg::param(1)]);
        interface("roi_tool", body)
    }

    /// Command line referencing an id declared nowhere.
    pub fn dangling_reference() -> Interface {
        let body = StructBody::default()
            .param(Param::string(1, "x"))
            .group(vec![Carg::param(99)]);
        interface("dangling", body)
    }

    /// A boolean parameter inside an output template.
    pub fn flag_in_output_path() -> Interface {
        let body = StructBody::default()
            .param(Param::flag(1, "verbose", "-v"))
            .group(vec![Carg::param(1)])
            .output(Output::new(1, "log", vec![OutputToken::param(1)]));
        interface("flagged", body)
    }

    /// Groups exercising every guard form.
    ///
    /// - `-i <input>`: no optional parameter
    /// - `-o <out>`: one optional parameter
    /// - `-r <a>x<b>`: two optional parameters
    /// - `--pair <p> <p>`: one optional parameter used twice
    pub fn guards() -> Interface {
        let body = StructBody::default()
            .param(Param::string(1, "input"))
            .param(Param::string(2, "out").nullable())
            .param(Param::int(3, "a").nullable())
            .param(Param::int(4, "b").nullable())
            .param(Param::string(5, "p").nullable())
            .group(vec![Carg::literal("-i"), Carg::param(1)])
            .group(vec![Carg::literal("-o"), Carg::param(2)])
            .group(vec![
                Carg::literal("-r"),
                Carg::new(vec![
                    Token::Param(ParamId(3)),
                    Token::Literal("x".into()),
                    Token::Param(ParamId(4)),
                ]),
            ])
            .group(vec![Carg::literal("--pair"), Carg::param(5), Carg::param(5)]);
        interface("guards", body)
    }

    /// Value bounds and a cardinality constraint.
    pub fn constrained() -> Interface {
        let bounded = Param::new(
            1,
            "level",
            ParamBody::Int(IntParam {
                min: Some(0),
                max: Some(9),
                choices: Vec::new(),
            }),
        );
        let files = Param::file(2, "files").list(ListSpec {
            count_min: Some(1),
            count_max: None,
            join: None,
        });
        let body = StructBody::default()
            .param(bounded.nullable())
            .param(files)
            .param(Param::string(3, "left").nullable())
            .param(Param::string(4, "right").nullable())
            .group(vec![Carg::literal("-l"), Carg::param(1)])
            .group(vec![Carg::param(2)])
            .group(vec![Carg::literal("--left"), Carg::param(3)])
            .group(vec![Carg::literal("--right"), Carg::param(4)])
            .constraint(GroupConstraint::new(Cardinality::ExactlyOne, [3, 4]));
        interface("constrained", body)
    }

    /// Parameter names colliding with infrastructure and with each other.
    pub fn name_collisions() -> Interface {
        let body = StructBody::default()
            .param(Param::string(1, "runner"))
            .param(Param::string(2, "execution"))
            .param(Param::string(3, "cargs"))
            .param(Param::string(4, "ret"))
            .param(Param::string(5, "my-param"))
            .param(Param::string(6, "my_param"))
            .param(Param::string(7, "class"))
            .group(vec![
                Carg::param(1),
                Carg::param(2),
                Carg::param(3),
                Carg::param(4),
                Carg::param(5),
                Carg::param(6),
                Carg::param(7),
            ]);
        interface("collide", body)
    }

    /// Captured stdout alongside a file output.
    pub fn std_streams() -> Interface {
        let mut iface = round_trip();
        iface.stdout_as_string_output = Some(StdStreamOutput {
            id: OutputId(100),
            name: "stdout".into(),
            docs: Documentation::default(),
        });
        iface
    }
}

/// Python-flavoured [`LanguageProvider`](crate::language::LanguageProvider)
/// for engine tests that must not depend on a backend crate.
pub mod stub {
    use styx_core::{quote_string, to_pascal_case, to_screaming_snake_case, to_snake_case};
    use styx_ir::{DefaultValue, Param, ParamBody};

    use crate::{
        builder::{Indent, PrimitiveType, TypeMapper},
        compile::{OUTPUT_ROOT, OUTPUTS_METHOD, RUN_METHOD},
        language::{CompareOp, LanguageProvider, LineBuffer, MStr, NamingConvention},
    };

    const STUB_NAMING: NamingConvention = NamingConvention {
        var_case: to_snake_case,
        type_case: to_pascal_case,
        constant_case: to_screaming_snake_case,
        file_case: to_snake_case,
        reserved_words: &["if", "not", "self"],
        underscore_fields: false,
    };

    fn literal(value: &DefaultValue) -> String {
        match value {
            DefaultValue::Bool(true) => "True".to_string(),
            DefaultValue::Bool(false) => "False".to_string(),
            DefaultValue::Int(v) => v.to_string(),
            DefaultValue::Float(v) => v.to_string(),
            DefaultValue::String(s) => quote_string(s),
            DefaultValue::List(items) => {
                format!("[{}]", items.iter().map(literal).collect::<Vec<_>>().join(", "))
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct StubProvider;

    impl TypeMapper for StubProvider {
        fn map_primitive(&self, ty: PrimitiveType) -> String {
            format!("{:?}", ty)
        }

        fn map_optional(&self, inner: &str) -> String {
            format!("{}?", inner)
        }

        fn map_array(&self, inner: &str) -> String {
            format!("[{}]", inner)
        }

        fn map_union(&self, members: &[String]) -> String {
            members.join(" | ")
        }

        fn map_literal(&self, values: &[DefaultValue]) -> String {
            values.iter().map(literal).collect::<Vec<_>>().join(" | ")
        }
    }

    impl LanguageProvider for StubProvider {
        fn naming(&self) -> &NamingConvention {
            &STUB_NAMING
        }

        fn runtime_symbols(&self) -> &'static [&'static str] {
            &["Runner", "Execution"]
        }

        fn indent(&self) -> Indent {
            Indent::PYTHON
        }

        fn expr_literal(&self, value: &DefaultValue) -> String {
            literal(value)
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
            format!("not {}", condition)
        }

        fn expr_concat_strs(&self, exprs: &[String]) -> String {
            exprs.join(" + ")
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
            format!("name({})", expr)
        }

        fn expr_numeric_to_str(&self, expr: &str) -> String {
            format!("str({})", expr)
        }

        fn expr_count_true(&self, conditions: &[String]) -> String {
            format!("count([{}])", conditions.join(", "))
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
            match &param.body {
                ParamBody::Bool(_) => MStr::list(format!("flag({})", symbol)),
                ParamBody::Struct(_) | ParamBody::StructUnion(_) => {
                    MStr::list(format!("{}.{}({})", symbol, RUN_METHOD, execution))
                }
                _ if param.is_list() => MStr::list(format!("strs({})", symbol)),
                ParamBody::String(_) => MStr::single(symbol),
                ParamBody::Int(_) | ParamBody::Float(_) => MStr::single(format!("str({})", symbol)),
                ParamBody::File(_) => MStr::single(format!("{}.input_file({})", execution, symbol)),
            }
        }

        fn param_var_is_set_by_user(&self, param: &Param, symbol: &str) -> Option<String> {
            if param.nullable {
                return Some(format!("{} is not None", symbol));
            }
            match &param.body {
                ParamBody::Bool(flag) if flag.value_false.is_empty() && !param.is_list() => {
                    Some(symbol.to_string())
                }
                _ => None,
            }
        }

        fn mstr_empty_literal_like(&self, mstr: &MStr) -> String {
            match mstr.is_list {
                true => "[]".to_string(),
                false => quote_string(""),
            }
        }

        fn mstr_concat(&self, mstrs: &[MStr]) -> MStr {
            let parts: Vec<String> = mstrs
                .iter()
                .map(|m| match m.is_list {
                    true => format!("join({})", m.expr),
                    false => m.expr.clone(),
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
                .map(|m| match m.is_list {
                    true => format!("*{}", m.expr),
                    false => m.expr.clone(),
                })
                .collect();
            vec![format!("{}.extend([{}])", cargs, items.join(", "))]
        }

        fn if_else_block(
            &self,
            condition: &str,
            truthy: LineBuffer,
            falsy: Option<LineBuffer>,
        ) -> LineBuffer {
            let indent = self.indent();
            let mut buf = vec![format!("if {}:", condition)];
            buf.extend(indent.indent_lines(truthy));
            if let Some(falsy) = falsy {
                buf.push("else:".to_string());
                buf.extend(indent.indent_lines(falsy));
            }
            buf
        }

        fn raise_constraint_violation(&self, message: &str) -> LineBuffer {
            vec![format!("raise Invalid({})", quote_string(message))]
        }

        fn return_statement(&self, expr: &str) -> String {
            format!("return {}", expr)
        }

        fn cargs_declare(&self, cargs: &str) -> LineBuffer {
            vec![format!("{} = []", cargs)]
        }

        fn runner_declare(&self, runner: &str) -> LineBuffer {
            vec![format!("{0} = {0} or global_runner()", runner)]
        }

        fn execution_declare(&self, execution: &str, runner: &str, metadata: &str) -> LineBuffer {
            vec![format!("{} = {}.start({})", execution, runner, metadata)]
        }

        fn execution_run(
            &self,
            execution: &str,
            cargs: &str,
            ret: &str,
            stdout_field: Option<&str>,
            stderr_field: Option<&str>,
        ) -> LineBuffer {
            let sinks: Vec<String> = [stdout_field, stderr_field]
                .into_iter()
                .map(|field| field.map_or("None".to_string(), |f| format!("{}.{}", ret, f)))
                .collect();
            vec![format!("{}.run({}, {})", execution, cargs, sinks.join(", "))]
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
            let item = if param.is_list() { "i" } else { symbol };
            let mut collect = format!("{}.{}({})", item, OUTPUTS_METHOD, execution);
            if may_lack_outputs {
                collect = self.expr_ternary(&format!("has_outputs({})", item), &collect, "None");
            }
            if param.is_list() {
                collect = format!("[{} for i in {}]", collect, symbol);
            }
            match param.nullable {
                true => self.expr_ternary(&format!("{} is not None", symbol), &collect, "None"),
                false => collect,
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
            let mut buf = vec![format!("{} = {}(", ret, output_type)];
            buf.extend(
                self.indent().indent_lines(
                    std::iter::once(format!("{}={},", OUTPUT_ROOT, root))
                        .chain(members.iter().map(|(field, value)| format!("{}={},", field, value)))
                        .collect(),
                ),
            );
            buf.push(")".to_string());
            buf
        }

        fn metadata_declare(&self, symbol: &str, entries: &[(&str, DefaultValue)]) -> LineBuffer {
            let fields: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}={}", key, literal(value)))
                .collect();
            vec![format!("{} = Metadata({})", symbol, fields.join(", "))]
        }

        fn wrapper_module_imports(&self) -> LineBuffer {
            vec!["from runtime import *".to_string()]
        }
    }
}
