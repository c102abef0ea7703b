//! Per-compilation symbol table.
//!
//! All names are allocated up front, before any code is emitted, so every
//! reference the engine renders resolves in O(1).

use std::collections::HashMap;

use styx_ir::{Interface, Param, ParamBody, ParamId, ParamIndex, StructBody};

use super::{CARGS, EXECUTION, OUTPUT_ROOT, OUTPUTS_METHOD, RET, RUN_METHOD, RUNNER};
use crate::{
    CompileError, Result,
    language::LanguageProvider,
    scope::{Scope, SymbolOwner},
};

/// Symbols chosen for one interface.
#[derive(Debug)]
pub struct SymbolTable<'i> {
    index: ParamIndex<'i>,
    /// Static metadata constant.
    pub metadata: String,
    /// Root entry point function.
    pub function: String,
    struct_types: HashMap<ParamId, String>,
    output_types: HashMap<ParamId, String>,
    vars: HashMap<ParamId, String>,
    output_fields: HashMap<SymbolOwner, String>,
}

impl<'i> SymbolTable<'i> {
    /// Allocate every symbol of `interface`.
    ///
    /// Module-level names (metadata, function, types) share one package
    /// scope. Each struct's members get a child of the function scope,
    /// which holds the strict infrastructure symbols, and each output record
    /// gets its own field scope.
    pub fn build(lang: &dyn LanguageProvider, interface: &'i Interface) -> Result<Self> {
        let naming = lang.naming();
        let command = &interface.command;
        if command.as_struct().is_none() {
            return Err(CompileError::ExpectedStruct {
                name: command.name.clone(),
            });
        }

        let mut table = Self {
            index: ParamIndex::new(command)?,
            metadata: String::new(),
            function: String::new(),
            struct_types: HashMap::new(),
            output_types: HashMap::new(),
            vars: HashMap::new(),
            output_fields: HashMap::new(),
        };

        let mut package = lang.language_base_scope();
        table.metadata = package.add_or_dodge(
            &naming.constant_name(&format!("{}_METADATA", command.name)),
            SymbolOwner::Metadata,
        );
        table.function =
            package.add_or_dodge(&naming.var_name(&command.name), SymbolOwner::Type(command.id));
        table
            .struct_types
            .insert(command.id, table.function.clone());
        table.output_types.insert(
            command.id,
            package.add_or_dodge(
                &naming.type_name(&format!("{}_Outputs", command.name)),
                SymbolOwner::OutputType(command.id),
            ),
        );

        for param in command.iter_params_recursively().skip(1) {
            if param.as_struct().is_none() {
                continue;
            }
            table.struct_types.insert(
                param.id,
                package.add_or_dodge(&naming.type_name(&param.name), SymbolOwner::Type(param.id)),
            );
            if param.has_outputs() {
                table.output_types.insert(
                    param.id,
                    package.add_or_dodge(
                        &naming.type_name(&format!("{}_Outputs", param.name)),
                        SymbolOwner::OutputType(param.id),
                    ),
                );
            }
        }

        let mut function_scope = lang.language_base_scope();
        for name in [RUNNER, EXECUTION, CARGS, RET] {
            function_scope.add_or_die(name, SymbolOwner::Infrastructure)?;
        }

        for param in command.iter_params_recursively() {
            let Some(body) = param.as_struct() else {
                continue;
            };
            let is_root = param.id == command.id;

            let mut members = function_scope.child();
            if !is_root {
                members.add_or_die(RUN_METHOD, SymbolOwner::Infrastructure)?;
                members.add_or_die(OUTPUTS_METHOD, SymbolOwner::Infrastructure)?;
            }
            for child in body.iter_params() {
                let symbol =
                    members.add_or_dodge(&naming.var_name(&child.name), SymbolOwner::Param(child.id));
                table.vars.insert(child.id, symbol);
            }

            if is_root || body.has_outputs() {
                table.allocate_output_fields(lang, interface, body, is_root)?;
            }
        }

        Ok(table)
    }

    fn allocate_output_fields(
        &mut self,
        lang: &dyn LanguageProvider,
        interface: &Interface,
        body: &StructBody,
        is_root: bool,
    ) -> Result<()> {
        let naming = lang.naming();
        let mut fields = lang.language_base_scope();
        fields.add_or_die(OUTPUT_ROOT, SymbolOwner::Infrastructure)?;

        if is_root {
            let streams = [
                &interface.stdout_as_string_output,
                &interface.stderr_as_string_output,
            ];
            for stream in streams.into_iter().flatten() {
                let owner = SymbolOwner::Output(stream.id);
                let symbol = fields.add_or_dodge(&naming.record_field_name(&stream.name), owner);
                self.output_fields.insert(owner, symbol);
            }
        }
        for output in &body.outputs {
            let owner = SymbolOwner::Output(output.id);
            let symbol = fields.add_or_dodge(&naming.record_field_name(&output.name), owner);
            self.output_fields.insert(owner, symbol);
        }
        for child in body.iter_params().filter(|p| p.has_outputs()) {
            let owner = SymbolOwner::Param(child.id);
            let symbol = fields.add_or_dodge(&naming.record_field_name(&child.name), owner);
            self.output_fields.insert(owner, symbol);
        }
        Ok(())
    }

    /// The declaring node of a parameter.
    pub fn param(&self, id: ParamId) -> Result<&'i Param> {
        self.index.get(id).ok_or_else(|| missing(id, "symbol lookup"))
    }

    /// Variable/field symbol of a parameter within its struct.
    pub fn var(&self, id: ParamId) -> Result<&str> {
        self.vars
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| missing(id, "parameter symbol"))
    }

    /// Data class (or root function) name of a struct parameter.
    pub fn struct_type(&self, id: ParamId) -> Result<&str> {
        self.struct_types
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| missing(id, "struct type"))
    }

    /// Output record name of a struct parameter that has outputs.
    pub fn output_type(&self, id: ParamId) -> Result<&str> {
        self.output_types
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| missing(id, "output type"))
    }

    /// Field symbol of an output, captured stream or sub-struct outputs.
    pub fn output_field(&self, owner: SymbolOwner) -> Option<&str> {
        self.output_fields.get(&owner).map(String::as_str)
    }

    /// Output record type of a struct or union parameter's alternatives
    /// that produce outputs, in declaration order.
    pub fn output_types_of(&self, param: &Param) -> Result<Vec<&str>> {
        match &param.body {
            ParamBody::Struct(_) => Ok(vec![self.output_type(param.id)?]),
            ParamBody::StructUnion(union) => union
                .alts
                .iter()
                .filter(|alt| alt.has_outputs())
                .map(|alt| self.output_type(alt.id))
                .collect(),
            ParamBody::String(_)
            | ParamBody::Int(_)
            | ParamBody::Float(_)
            | ParamBody::Bool(_)
            | ParamBody::File(_) => Ok(Vec::new()),
        }
    }
}

fn missing(id: ParamId, context: &str) -> CompileError {
    CompileError::MalformedReference {
        context: context.to_string(),
        id,
    }
}
