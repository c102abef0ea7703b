//! The depth-first struct walk.

use styx_ir::{DefaultValue, Interface, Param, ParamBody, StdStreamOutput, StructBody};

use super::{
    CARGS, EXECUTION, OUTPUTS_METHOD, RET, RUN_METHOD, RUNNER, SymbolTable, cargs,
    constraints, docs::docs_text, outputs::OutputsCompiler,
};
use crate::{
    CompileError, Result,
    builder::{ArgSpec, FunctionSpec, PrimitiveType, StructSpec, TypeRef},
    language::LanguageProvider,
    model::{GenericModule, Item},
    scope::SymbolOwner,
};

pub(crate) struct StructCompiler<'a> {
    lang: &'a dyn LanguageProvider,
    interface: &'a Interface,
    symbols: &'a SymbolTable<'a>,
}

impl<'a> StructCompiler<'a> {
    pub fn new(
        lang: &'a dyn LanguageProvider,
        interface: &'a Interface,
        symbols: &'a SymbolTable<'a>,
    ) -> Self {
        Self {
            lang,
            interface,
            symbols,
        }
    }

    pub fn compile_root(&self, module: &mut GenericModule) -> Result<()> {
        let command = &self.interface.command;
        let body = command.as_struct().ok_or_else(|| CompileError::ExpectedStruct {
            name: command.name.clone(),
        })?;
        self.compile_struct(command, body, true, module)
    }

    fn outputs(&self) -> OutputsCompiler<'_> {
        OutputsCompiler {
            lang: self.lang,
            interface: self.interface,
            symbols: self.symbols,
        }
    }

    /// Emit `param`'s nested types, output record and its function or class.
    ///
    /// Children are pushed first, so every type precedes its first use.
    fn compile_struct(
        &self,
        param: &Param,
        body: &StructBody,
        is_root: bool,
        module: &mut GenericModule,
    ) -> Result<()> {
        tracing::debug!(name = %param.name, is_root, "compiling struct");
        let lang = self.lang;
        let via_self = !is_root;

        let mut args = Vec::with_capacity(body.params.len() + 1);
        for child in body.iter_params() {
            let mut arg = ArgSpec::new(self.symbols.var(child.id)?, self.param_type(child)?)
                .default(lang.param_default_value(child));
            if let Some(doc) = docs_text(&child.docs) {
                arg = arg.doc(doc);
            }
            args.push(arg);

            match &child.body {
                ParamBody::Struct(child_body) => {
                    self.compile_struct(child, child_body, false, module)?
                }
                ParamBody::StructUnion(union) => {
                    for alt in &union.alts {
                        let alt_body = alt.as_struct().ok_or_else(|| {
                            CompileError::ExpectedStruct {
                                name: alt.name.clone(),
                            }
                        })?;
                        self.compile_struct(alt, alt_body, false, module)?;
                    }
                }
                ParamBody::String(_)
                | ParamBody::Int(_)
                | ParamBody::Float(_)
                | ParamBody::Bool(_)
                | ParamBody::File(_) => {}
            }
        }

        let output_type = if is_root || body.has_outputs() {
            let output_type = self.symbols.output_type(param.id)?;
            let record = self.outputs().record(param, body, is_root, output_type)?;
            module.push(Item::OutputRecord(record));
            module.export(output_type);
            Some(output_type)
        } else {
            None
        };

        let mut build = constraints::compile_constraint_checks(lang, self.symbols, body, via_self)?;

        if is_root {
            build.extend(lang.runner_declare(RUNNER));
            build.extend(lang.execution_declare(EXECUTION, RUNNER, &self.symbols.metadata));
        }
        build.extend(cargs::compile_cargs_building(lang, self.symbols, body, via_self)?);

        let struct_type = self.symbols.struct_type(param.id)?;
        match output_type {
            Some(output_type) if is_root => {
                args.push(
                    ArgSpec::new(RUNNER, TypeRef::optional(TypeRef::Primitive(PrimitiveType::Runner)))
                        .default(Some(lang.expr_null()))
                        .doc("Command runner."),
                );
                build.extend(self.outputs().building(body, true, output_type)?);
                build.extend(lang.execution_run(
                    EXECUTION,
                    CARGS,
                    RET,
                    self.stream_field(&self.interface.stdout_as_string_output),
                    self.stream_field(&self.interface.stderr_as_string_output),
                ));
                build.push(lang.return_statement(RET));

                let mut function = FunctionSpec::new(struct_type)
                    .returns(TypeRef::named(output_type))
                    .return_doc(format!("NamedTuple of outputs (described in `{output_type}`)."));
                if let Some(doc) = docs_text(&param.docs) {
                    function = function.doc(doc);
                }
                function.params = args;
                function.body = build;
                module.push(Item::Function(function));
            }
            _ => {
                build.push(lang.return_statement(CARGS));
                let mut run = FunctionSpec::new(RUN_METHOD)
                    .method()
                    .doc("Build command-line arguments from parameters.")
                    .param(execution_arg())
                    .returns(TypeRef::string_list())
                    .return_doc("Command-line arguments.");
                run.body = build;

                let mut class = StructSpec::new(struct_type).fields(args).method(run);
                if let Some(doc) = docs_text(&param.docs) {
                    class = class.doc(doc);
                }
                if let Some(output_type) = output_type {
                    let mut collect = FunctionSpec::new(OUTPUTS_METHOD)
                        .method()
                        .doc("Collect output file paths.")
                        .param(execution_arg())
                        .returns(TypeRef::named(output_type))
                        .return_doc(format!("NamedTuple of outputs (described in `{output_type}`)."));
                    collect.body = self.outputs().building(body, false, output_type)?;
                    collect.body.push(lang.return_statement(RET));
                    class = class.method(collect);
                }
                module.push(Item::DataClass(class));
                module.export(struct_type);
            }
        }
        Ok(())
    }

    /// Argument/field type of a parameter.
    fn param_type(&self, param: &Param) -> Result<TypeRef> {
        let base = match &param.body {
            ParamBody::String(string) if !string.choices.is_empty() => TypeRef::Literal(
                string
                    .choices
                    .iter()
                    .cloned()
                    .map(DefaultValue::String)
                    .collect(),
            ),
            ParamBody::String(_) => TypeRef::string(),
            ParamBody::Int(int) if !int.choices.is_empty() => {
                TypeRef::Literal(int.choices.iter().copied().map(DefaultValue::Int).collect())
            }
            ParamBody::Int(_) => TypeRef::int(),
            ParamBody::Float(_) => TypeRef::float(),
            ParamBody::Bool(_) => TypeRef::bool(),
            ParamBody::File(_) => TypeRef::Primitive(PrimitiveType::InputPath),
            ParamBody::Struct(_) => TypeRef::named(self.symbols.struct_type(param.id)?),
            ParamBody::StructUnion(union) => TypeRef::union(
                union
                    .alts
                    .iter()
                    .map(|alt| self.symbols.struct_type(alt.id).map(TypeRef::named))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        let ty = if param.is_list() {
            TypeRef::array(base)
        } else {
            base
        };
        Ok(if param.nullable {
            TypeRef::optional(ty)
        } else {
            ty
        })
    }

    fn stream_field(&self, stream: &Option<StdStreamOutput>) -> Option<&str> {
        let stream = stream.as_ref()?;
        self.symbols.output_field(SymbolOwner::Output(stream.id))
    }
}

fn execution_arg() -> ArgSpec {
    ArgSpec::new(EXECUTION, TypeRef::Primitive(PrimitiveType::Execution))
        .doc("The execution object for resolving input paths.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, stub::StubProvider};

    fn compile(iface: &Interface) -> GenericModule {
        let symbols = SymbolTable::build(&StubProvider, iface).unwrap();
        let mut module = GenericModule::new();
        StructCompiler::new(&StubProvider, iface, &symbols)
            .compile_root(&mut module)
            .unwrap();
        module
    }

    #[test]
    fn test_children_precede_parents() {
        let module = compile(&fixtures::nested_struct());

        let names: Vec<_> = module.items.iter().map(Item::name).collect();
        assert_eq!(names, ["RoiOutputs", "Roi", "Opts", "RoiToolOutputs", "roi_tool"]);
        assert_eq!(module.exports, ["RoiOutputs", "Roi", "Opts", "RoiToolOutputs"]);
    }

    #[test]
    fn test_data_class_methods() {
        let module = compile(&fixtures::nested_struct());

        let roi = module.data_class("Roi").unwrap();
        let methods: Vec<_> = roi.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, [RUN_METHOD, OUTPUTS_METHOD]);
        assert_eq!(roi.get_method(RUN_METHOD).unwrap().body.last().unwrap(), "return cargs");
        assert_eq!(roi.get_method(OUTPUTS_METHOD).unwrap().body.last().unwrap(), "return ret");

        let opts = module.data_class("Opts").unwrap();
        assert!(opts.get_method(OUTPUTS_METHOD).is_none());
        assert_eq!(opts.fields[0].ty, TypeRef::optional(TypeRef::float()));
    }

    #[test]
    fn test_root_function_signature_and_body() {
        let module = compile(&fixtures::nested_struct());
        let function = module.function("roi_tool").unwrap();

        let params: Vec<_> = function.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, ["roi", "opts", RUNNER]);
        assert_eq!(function.params[0].ty, TypeRef::array(TypeRef::named("Roi")));
        assert_eq!(function.params[1].ty, TypeRef::optional(TypeRef::named("Opts")));
        assert_eq!(function.params[1].default.as_deref(), Some("None"));
        assert_eq!(function.return_type, Some(TypeRef::named("RoiToolOutputs")));

        let body = &function.body;
        assert_eq!(body[0], "runner = runner or global_runner()");
        assert_eq!(body[1], "execution = runner.start(ROI_TOOL_METADATA)");
        assert_eq!(body[body.len() - 2], "execution.run(cargs, None, None)");
        assert_eq!(body[body.len() - 1], "return ret");
    }

    #[test]
    fn test_union_alternatives_become_data_classes() {
        let module = compile(&fixtures::nested_union());

        assert!(module.data_class("Fast").is_some());
        assert!(module.data_class("Slow").is_some());
        assert!(module.output_record("FastOutputs").is_some());
        assert!(module.output_record("SlowOutputs").is_none());
        assert_eq!(
            module.function("nested").unwrap().params[0].ty,
            TypeRef::union([TypeRef::named("Fast"), TypeRef::named("Slow")])
        );
    }

    #[test]
    fn test_captured_stdout_is_passed_to_run() {
        let module = compile(&fixtures::std_streams());
        let body = &module.function("round_trip").unwrap().body;

        assert!(body.contains(&"execution.run(cargs, ret.stdout, None)".to_string()));
    }
}
