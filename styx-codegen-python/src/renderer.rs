//! Renders a compiled [`GenericModule`] to Python source.

use styx_codegen::{
    builder::{ArgSpec, CodeBuilder, FunctionSpec, StructSpec, TypeMapper},
    model::{GenericModule, Item},
};
use styx_core::quote_string;

use crate::provider::PythonProvider;

const HEADER: &[&str] = &[
    "# This file was auto generated by Styx.",
    "# Do not edit this file directly.",
];

/// Python module renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonRenderer {
    types: PythonProvider,
}

impl PythonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, module: &GenericModule) -> String {
        let mut code = CodeBuilder::python();
        code.push_lines(HEADER).push_blank();
        code.push_lines(&module.imports);

        if !module.header.is_empty() {
            code.push_blank().push_blank();
            code.push_lines(&module.header);
        }

        for item in &module.items {
            code.push_blank().push_blank();
            match item {
                Item::Function(function) => self.render_function(&mut code, function),
                Item::DataClass(class) => self.render_data_class(&mut code, class),
                Item::OutputRecord(record) => self.render_output_record(&mut code, record),
            }
        }

        code.push_blank().push_blank();
        code.push_line("__all__ = [");
        code.push_indent();
        for export in &module.exports {
            code.push_line(&format!("{},", quote_string(export)));
        }
        code.push_dedent();
        code.push_line("]");
        code.build()
    }

    fn render_output_record(&self, code: &mut CodeBuilder, record: &StructSpec) {
        code.push_line(&format!("class {}(typing.NamedTuple):", record.name));
        code.push_indent();
        if let Some(doc) = &record.doc {
            push_docstring(code, doc);
        }
        for field in &record.fields {
            code.push_line(&format!("{}: {}", field.name, self.types.render_type(&field.ty)));
            if let Some(doc) = &field.doc {
                push_docstring(code, doc);
            }
        }
        code.push_dedent();
    }

    fn render_data_class(&self, code: &mut CodeBuilder, class: &StructSpec) {
        code.push_line("@dataclasses.dataclass");
        code.push_line(&format!("class {}:", class.name));
        code.push_indent();
        if let Some(doc) = &class.doc {
            push_docstring(code, doc);
        }
        for field in class.ordered_fields() {
            let ty = self.types.render_type(&field.ty);
            match &field.default {
                // Mutable defaults need a factory
                Some(default) if default.starts_with('[') => code.push_line(&format!(
                    "{}: {} = dataclasses.field(default_factory=lambda: {})",
                    field.name, ty, default
                )),
                Some(default) => code.push_line(&format!("{}: {} = {}", field.name, ty, default)),
                None => code.push_line(&format!("{}: {}", field.name, ty)),
            };
            if let Some(doc) = &field.doc {
                push_docstring(code, doc);
            }
        }
        for method in &class.methods {
            code.push_blank();
            self.render_function(code, method);
        }
        code.push_dedent();
    }

    fn render_function(&self, code: &mut CodeBuilder, function: &FunctionSpec) {
        code.push_line(&format!("def {}(", function.name));
        code.push_indent();
        if function.receiver {
            code.push_line("self,");
        }
        for arg in function.ordered_params() {
            code.push_line(&format!("{},", self.render_arg(arg)));
        }
        code.push_dedent();
        match &function.return_type {
            Some(ty) => code.push_line(&format!(") -> {}:", self.types.render_type(ty))),
            None => code.push_line(") -> None:"),
        };

        code.push_indent();
        push_docstring(code, &function_docstring(function));
        code.push_lines(&function.body);
        code.push_dedent();
    }

    fn render_arg(&self, arg: &ArgSpec) -> String {
        let ty = self.types.render_type(&arg.ty);
        match &arg.default {
            Some(default) => format!("{}: {} = {}", arg.name, ty, default),
            None => format!("{}: {}", arg.name, ty),
        }
    }
}

/// Google-style docstring body with `Args:` and `Returns:` sections.
fn function_docstring(function: &FunctionSpec) -> String {
    let mut sections = Vec::new();
    if let Some(doc) = &function.doc {
        sections.push(doc.clone());
    }

    let args: Vec<&ArgSpec> = function.ordered_params();
    if !args.is_empty() {
        let mut lines = vec!["Args:".to_string()];
        for arg in args {
            let doc = arg.doc.as_deref().map(single_line).unwrap_or_default();
            lines.push(format!("    {}: {}", arg.name, doc).trim_end().to_string());
        }
        sections.push(lines.join("\n"));
    }

    if let Some(doc) = &function.return_doc {
        sections.push(format!("Returns:\n    {}", single_line(doc)));
    }
    sections.join("\n\n")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_docstring(code: &mut CodeBuilder, text: &str) {
    let text = text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");
    let lines: Vec<&str> = text.lines().collect();
    match lines.as_slice() {
        [] => {}
        [line] => {
            code.push_line(&format!("\"\"\"{}\"\"\"", line));
        }
        lines => {
            code.push_line("\"\"\"");
            code.push_lines(lines);
            code.push_line("\"\"\"");
        }
    }
}

#[cfg(test)]
mod tests {
    use styx_codegen::builder::TypeRef;

    use super::*;

    #[test]
    fn test_render_data_class_with_mutable_default() {
        let class = StructSpec::new("Opts")
            .field(ArgSpec::new("names", TypeRef::string_list()).default(Some("[\"a\"]".into())))
            .field(ArgSpec::new("level", TypeRef::int()));
        let mut code = CodeBuilder::python();
        PythonRenderer::new().render_data_class(&mut code, &class);

        insta::assert_snapshot!(code.build(), @r#"
        @dataclasses.dataclass
        class Opts:
            level: int
            names: list[str] = dataclasses.field(default_factory=lambda: ["a"])
        "#);
    }

    #[test]
    fn test_docstring_escapes_quotes() {
        let mut code = CodeBuilder::python();
        push_docstring(&mut code, "Say \"\"\"hi\"\"\"");
        assert_eq!(code.build(), "\"\"\"Say \\\"\\\"\\\"hi\\\"\\\"\\\"\"\"\"\n");
    }

    #[test]
    fn test_function_docstring_sections() {
        let function = FunctionSpec::new("bet")
            .doc("Brain extraction.")
            .param(ArgSpec::new("infile", TypeRef::string()).doc("Input\nimage."))
            .returns(TypeRef::named("BetOutputs"))
            .return_doc("NamedTuple of outputs.");
        assert_eq!(
            function_docstring(&function),
            "Brain extraction.\n\nArgs:\n    infile: Input image.\n\nReturns:\n    NamedTuple of outputs."
        );
    }
}
