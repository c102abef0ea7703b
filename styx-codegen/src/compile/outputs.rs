//! Output records and the code filling them.

use styx_ir::{Interface, OutputParamReference, Output, OutputToken, Param, ParamBody, StructBody};

use super::{EXECUTION, OUTPUT_ROOT, RET, SymbolTable, access, docs::docs_text, validate};
use crate::{
    CompileError, Result,
    builder::{ArgSpec, PrimitiveType, StructSpec, TypeRef},
    language::{LanguageProvider, LineBuffer},
    scope::SymbolOwner,
};

pub(crate) struct OutputsCompiler<'a> {
    pub lang: &'a dyn LanguageProvider,
    pub interface: &'a Interface,
    pub symbols: &'a SymbolTable<'a>,
}

impl OutputsCompiler<'_> {
    /// Record type: the output root, captured streams (root only), every
    /// declared output and the outputs of sub-structs that have any.
    pub fn record(
        &self,
        param: &Param,
        body: &StructBody,
        is_root: bool,
        output_type: &str,
    ) -> Result<StructSpec> {
        let struct_type = self.symbols.struct_type(param.id)?;
        let mut record = StructSpec::new(output_type)
            .doc(format!("Output object returned when calling `{struct_type}(...)`."))
            .field(
                ArgSpec::new(OUTPUT_ROOT, TypeRef::Primitive(PrimitiveType::OutputPath))
                    .doc("Output root folder. This is the root folder for all outputs."),
            );

        if is_root {
            for (field, doc) in self.stream_fields() {
                record = record.field(ArgSpec::new(field, TypeRef::string_list()).doc(doc));
            }
        }

        for output in &body.outputs {
            let field = self.field(SymbolOwner::Output(output.id), &output.name)?;
            let mut optional = false;
            for reference in output.param_refs() {
                optional |= self.symbols.param(reference.id)?.nullable;
            }
            let ty = TypeRef::Primitive(PrimitiveType::OutputPath);
            let mut arg = ArgSpec::new(field, if optional { TypeRef::optional(ty) } else { ty });
            if let Some(doc) = docs_text(&output.docs) {
                arg = arg.doc(doc);
            }
            record = record.field(arg);
        }

        for child in body.iter_params().filter(|p| p.has_outputs()) {
            let field = self.field(SymbolOwner::Param(child.id), &child.name)?;
            let alternatives = self.symbols.output_types_of(child)?;
            let mut element = TypeRef::union(alternatives.iter().map(|ty| TypeRef::named(*ty)));
            if lacks_outputs(child) {
                element = TypeRef::optional(element);
            }
            let mut doc = format!(
                "Outputs from {}.",
                alternatives
                    .iter()
                    .map(|ty| format!("`{ty}`"))
                    .collect::<Vec<_>>()
                    .join(" or ")
            );
            let mut ty = element;
            if child.is_list() {
                ty = TypeRef::array(ty);
                doc.push_str(" This is a list of outputs with the same length and order as the inputs.");
            }
            if child.nullable {
                ty = TypeRef::optional(ty);
            }
            record = record.field(ArgSpec::new(field, ty).doc(doc));
        }

        Ok(record)
    }

    /// Statements constructing the record into `ret`.
    pub fn building(
        &self,
        body: &StructBody,
        is_root: bool,
        output_type: &str,
    ) -> Result<LineBuffer> {
        let lang = self.lang;
        let via_self = !is_root;
        let mut members: Vec<(String, String)> = Vec::new();

        if is_root {
            for (field, _) in self.stream_fields() {
                members.push((field, lang.expr_empty_str_list()));
            }
        }

        for output in &body.outputs {
            let field = self.field(SymbolOwner::Output(output.id), &output.name)?;
            members.push((field, self.output_path(output, via_self)?));
        }

        for child in body.iter_params().filter(|p| p.has_outputs()) {
            let field = self.field(SymbolOwner::Param(child.id), &child.name)?;
            let symbol = access(lang, self.symbols.var(child.id)?, via_self);
            members.push((
                field,
                lang.struct_collect_outputs(child, &symbol, EXECUTION, lacks_outputs(child)),
            ));
        }

        Ok(lang.generate_ret_object_creation(RET, EXECUTION, output_type, &members))
    }

    /// Resolved path of one output, null when a referenced optional
    /// parameter is unset.
    fn output_path(&self, output: &Output, via_self: bool) -> Result<String> {
        let lang = self.lang;
        let mut segments = Vec::with_capacity(output.tokens.len());
        let mut conditions = Vec::new();

        for token in &output.tokens {
            match token {
                OutputToken::Literal(text) => segments.push(lang.expr_str(text)),
                OutputToken::Param(reference) => {
                    let param = self.symbols.param(reference.id)?;
                    let symbol = access(lang, self.symbols.var(reference.id)?, via_self);
                    segments.push(self.substitution(output, param, &symbol, reference)?);
                    if let Some(condition) = lang.param_var_is_set_by_user(param, &symbol) {
                        conditions.push(condition);
                    }
                }
            }
        }

        let resolved = lang.resolve_output_file(EXECUTION, &lang.expr_concat_strs(&segments));
        if conditions.is_empty() {
            Ok(resolved)
        } else {
            Ok(lang.expr_ternary(
                &lang.expr_conditions_join_and(&conditions),
                &resolved,
                &lang.expr_null(),
            ))
        }
    }

    /// String form of a parameter inside a path template.
    fn substitution(
        &self,
        output: &Output,
        param: &Param,
        symbol: &str,
        reference: &OutputParamReference,
    ) -> Result<String> {
        if let Some(kind) = validate::unsupported_template_kind(param) {
            return Err(CompileError::UnsupportedTemplateType {
                output: output.name.clone(),
                param: param.name.clone(),
                kind: kind.to_string(),
            });
        }
        let lang = self.lang;
        Ok(match &param.body {
            ParamBody::Int(_) | ParamBody::Float(_) => lang.expr_numeric_to_str(symbol),
            ParamBody::File(_) => lang.expr_remove_suffixes(
                &lang.expr_path_get_filename(symbol),
                &reference.remove_suffixes,
            ),
            _ => lang.expr_remove_suffixes(symbol, &reference.remove_suffixes),
        })
    }

    /// Captured stdout/stderr fields with their docs.
    fn stream_fields(&self) -> Vec<(String, String)> {
        let streams = [
            (&self.interface.stdout_as_string_output, "stdout"),
            (&self.interface.stderr_as_string_output, "stderr"),
        ];
        streams
            .into_iter()
            .filter_map(|(stream, label)| {
                let stream = stream.as_ref()?;
                let field = self.symbols.output_field(SymbolOwner::Output(stream.id))?;
                let doc = docs_text(&stream.docs)
                    .unwrap_or_else(|| format!("Output collected from {label}."));
                Some((field.to_string(), doc))
            })
            .collect()
    }

    fn field(&self, owner: SymbolOwner, name: &str) -> Result<String> {
        self.symbols
            .output_field(owner)
            .map(str::to_string)
            .ok_or_else(|| CompileError::NameConflict {
                name: name.to_string(),
            })
    }
}

/// A union where some alternative produces no outputs.
pub(crate) fn lacks_outputs(param: &Param) -> bool {
    match &param.body {
        ParamBody::StructUnion(union) => union.alts.iter().any(|alt| !alt.has_outputs()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use styx_ir::{Carg, ListSpec, ParamId};

    use super::*;
    use crate::testing::{fixtures, stub::StubProvider};

    fn roi_list() -> Interface {
        let roi = StructBody::default()
            .param(Param::string(11, "label"))
            .group(vec![Carg::param(11)])
            .output(Output::new(
                2,
                "mask",
                vec![OutputToken::param(11), OutputToken::literal("_mask.nii")],
            ));
        let body = StructBody::default()
            .param(
                Param::structure(1, "roi", roi)
                    .list(ListSpec::default())
                    .nullable(),
            )
            .group(vec![Carg::param(1)]);
        fixtures::interface("tool", body)
    }

    #[test]
    fn test_nullable_list_of_struct_field() {
        let iface = roi_list();
        let symbols = SymbolTable::build(&StubProvider, &iface).unwrap();
        let compiler = OutputsCompiler {
            lang: &StubProvider,
            interface: &iface,
            symbols: &symbols,
        };
        let body = iface.command.as_struct().unwrap();

        let record = compiler.record(&iface.command, body, true, "ToolOutputs").unwrap();
        let field = record.get_field("roi").unwrap();
        assert_eq!(
            field.ty,
            TypeRef::optional(TypeRef::array(TypeRef::named("RoiOutputs")))
        );
        assert!(field.doc.as_deref().unwrap().contains("same length and order"));

        let lines = compiler.building(body, true, "ToolOutputs").unwrap();
        assert_eq!(
            lines,
            [
                "ret = ToolOutputs(",
                "    root=execution.output_file(\".\"),",
                "    roi=([i.outputs(execution) for i in roi] if roi is not None else None),",
                ")",
            ]
        );
    }

    #[test]
    fn test_optional_reference_makes_output_nullable() {
        let body = StructBody::default()
            .param(Param::string(1, "prefix").nullable())
            .group(vec![Carg::param(1)])
            .output(Output::new(
                1,
                "out",
                vec![OutputToken::param(1), OutputToken::literal(".txt")],
            ));
        let iface = fixtures::interface("tool", body);
        let symbols = SymbolTable::build(&StubProvider, &iface).unwrap();
        let compiler = OutputsCompiler {
            lang: &StubProvider,
            interface: &iface,
            symbols: &symbols,
        };
        let body = iface.command.as_struct().unwrap();

        let record = compiler.record(&iface.command, body, true, "ToolOutputs").unwrap();
        assert_eq!(
            record.get_field("out").unwrap().ty,
            TypeRef::optional(TypeRef::Primitive(PrimitiveType::OutputPath))
        );

        let lines = compiler.building(body, true, "ToolOutputs").unwrap();
        assert_eq!(
            lines[2],
            "    out=(execution.output_file(prefix + \".txt\") if prefix is not None else None),"
        );
    }

    #[test]
    fn test_union_alternative_without_outputs() {
        let iface = fixtures::nested_union();
        let symbols = SymbolTable::build(&StubProvider, &iface).unwrap();
        let compiler = OutputsCompiler {
            lang: &StubProvider,
            interface: &iface,
            symbols: &symbols,
        };
        let body = iface.command.as_struct().unwrap();

        let record = compiler.record(&iface.command, body, true, "NestedOutputs").unwrap();
        assert_eq!(
            record.get_field("mode").unwrap().ty,
            TypeRef::optional(TypeRef::named("FastOutputs"))
        );

        let lines = compiler.building(body, true, "NestedOutputs").unwrap();
        assert_eq!(
            lines[2],
            "    mode=(mode.outputs(execution) if has_outputs(mode) else None),"
        );
    }

    #[test]
    fn test_file_reference_strips_suffixes_through_self() {
        let iface = fixtures::nested_union();
        let symbols = SymbolTable::build(&StubProvider, &iface).unwrap();
        let compiler = OutputsCompiler {
            lang: &StubProvider,
            interface: &iface,
            symbols: &symbols,
        };
        let fast = symbols.param(ParamId(2)).unwrap().as_struct().unwrap();

        let lines = compiler.building(fast, false, "FastOutputs").unwrap();
        assert_eq!(
            lines[2],
            "    result=execution.output_file(name(self.input).removesuffix(\".nii.gz\").removesuffix(\".nii\") + \"_fast.nii.gz\"),"
        );
    }

    #[test]
    fn test_captured_streams_lead_root_record() {
        let iface = fixtures::std_streams();
        let symbols = SymbolTable::build(&StubProvider, &iface).unwrap();
        let compiler = OutputsCompiler {
            lang: &StubProvider,
            interface: &iface,
            symbols: &symbols,
        };
        let body = iface.command.as_struct().unwrap();

        let record = compiler.record(&iface.command, body, true, "RoundTripOutputs").unwrap();
        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["root", "stdout", "out"]);
        assert_eq!(record.fields[1].ty, TypeRef::string_list());
    }
}
