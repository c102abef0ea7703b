//! Renders a compiled [`GenericModule`] to TypeScript source.

use styx_codegen::{
    builder::{ArgSpec, CodeBuilder, FunctionSpec, StructSpec, TypeMapper},
    model::{GenericModule, Item},
};

use crate::provider::TypeScriptProvider;

const HEADER: &[&str] = &[
    "// This file was auto generated by Styx.",
    "// Do not edit this file directly.",
];

/// TypeScript module renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer {
    types: TypeScriptProvider,
}

impl TypeScriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, module: &GenericModule) -> String {
        let mut code = CodeBuilder::typescript();
        code.push_lines(HEADER).push_blank();
        code.push_lines(&module.imports);

        if !module.header.is_empty() {
            code.push_blank();
            code.push_lines(&module.header);
        }

        for item in &module.items {
            code.push_blank();
            match item {
                Item::Function(function) => self.render_function(&mut code, function, "function "),
                Item::DataClass(class) => self.render_class(&mut code, class),
                Item::OutputRecord(record) => self.render_interface(&mut code, record),
            }
        }

        code.push_blank();
        code.push_line("export {");
        code.push_indent();
        for export in &module.exports {
            code.push_line(&format!("{},", export));
        }
        code.push_dedent();
        code.push_line("};");
        code.build()
    }

    fn render_interface(&self, code: &mut CodeBuilder, record: &StructSpec) {
        push_doc_comment(code, record.doc.as_deref());
        code.push_line(&format!("interface {} {{", record.name));
        code.push_indent();
        for field in &record.fields {
            push_doc_comment(code, field.doc.as_deref());
            code.push_line(&format!("{}: {};", field.name, self.types.render_type(&field.ty)));
        }
        code.push_dedent();
        code.push_line("}");
    }

    fn render_class(&self, code: &mut CodeBuilder, class: &StructSpec) {
        let fields = class.ordered_fields();

        push_doc_comment(code, class.doc.as_deref());
        code.push_line(&format!("class {} {{", class.name));
        code.push_indent();
        for field in &fields {
            push_doc_comment(code, field.doc.as_deref());
            code.push_line(&format!("{}: {};", field.name, self.types.render_type(&field.ty)));
        }

        code.push_blank();
        let constructor = FunctionSpec {
            params: fields.iter().map(|f| (*f).clone()).collect(),
            body: fields
                .iter()
                .map(|f| format!("this.{0} = {0};", f.name))
                .collect(),
            ..FunctionSpec::new("constructor")
        };
        self.render_signature(code, &constructor, "");
        code.push_indent();
        code.push_lines(&constructor.body);
        code.push_dedent();
        code.push_line("}");

        for method in &class.methods {
            code.push_blank();
            self.render_function(code, method, "");
        }
        code.push_dedent();
        code.push_line("}");
    }

    /// Free functions take the `function ` keyword; methods pass an empty one.
    fn render_function(&self, code: &mut CodeBuilder, function: &FunctionSpec, keyword: &str) {
        push_doc_comment(code, Some(&function_jsdoc(function)));
        self.render_signature(code, function, keyword);
        code.push_indent();
        code.push_lines(&function.body);
        code.push_dedent();
        code.push_line("}");
    }

    fn render_signature(&self, code: &mut CodeBuilder, function: &FunctionSpec, keyword: &str) {
        let params = function.ordered_params();
        let ret = function
            .return_type
            .as_ref()
            .map(|ty| format!(": {}", self.types.render_type(ty)))
            .unwrap_or_default();
        if params.is_empty() {
            code.push_line(&format!("{}{}(){} {{", keyword, function.name, ret));
            return;
        }
        code.push_line(&format!("{}{}(", keyword, function.name));
        code.push_indent();
        for arg in params {
            code.push_line(&format!("{},", self.render_arg(arg)));
        }
        code.push_dedent();
        code.push_line(&format!("){} {{", ret));
    }

    fn render_arg(&self, arg: &ArgSpec) -> String {
        let ty = self.types.render_type(&arg.ty);
        match &arg.default {
            Some(default) => format!("{}: {} = {}", arg.name, ty, default),
            None => format!("{}: {}", arg.name, ty),
        }
    }
}

/// JSDoc body with `@param` and `@returns` tags.
fn function_jsdoc(function: &FunctionSpec) -> String {
    let mut sections = Vec::new();
    if let Some(doc) = &function.doc {
        sections.push(doc.clone());
    }

    let tags: Vec<String> = function
        .ordered_params()
        .into_iter()
        .map(|arg| {
            let doc = arg.doc.as_deref().map(single_line).unwrap_or_default();
            format!("@param {} {}", arg.name, doc).trim_end().to_string()
        })
        .chain(
            function
                .return_doc
                .as_deref()
                .map(|doc| format!("@returns {}", single_line(doc))),
        )
        .collect();
    if !tags.is_empty() {
        sections.push(tags.join("\n"));
    }
    sections.join("\n\n")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_doc_comment(code: &mut CodeBuilder, text: Option<&str>) {
    let Some(text) = text else { return };
    let text = text.replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().collect();
    match lines.as_slice() {
        [] => {}
        [line] => {
            code.push_jsdoc(line);
        }
        lines => {
            code.push_line("/**");
            for line in lines {
                if line.is_empty() {
                    code.push_line(" *");
                } else {
                    code.push_line(&format!(" * {}", line));
                }
            }
            code.push_line(" */");
        }
    }
}

#[cfg(test)]
mod tests {
    use styx_codegen::builder::TypeRef;

    use super::*;

    #[test]
    fn test_render_class_constructor() {
        let class = StructSpec::new("Opts")
            .doc("Options.")
            .field(ArgSpec::new("names", TypeRef::string_list()).default(Some("[\"a\"]".into())))
            .field(ArgSpec::new("level", TypeRef::int()).doc("Level."));
        let mut code = CodeBuilder::typescript();
        TypeScriptRenderer::new().render_class(&mut code, &class);

        insta::assert_snapshot!(code.build(), @r#"
        /** Options. */
        class Opts {
          /** Level. */
          level: number;
          names: string[];

          constructor(
            level: number,
            names: string[] = ["a"],
          ) {
            this.level = level;
            this.names = names;
          }
        }
        "#);
    }

    #[test]
    fn test_doc_comment_escapes_terminator() {
        let mut code = CodeBuilder::typescript();
        push_doc_comment(&mut code, Some("a */ b"));
        assert_eq!(code.build(), "/** a *\\/ b */\n");
    }

    #[test]
    fn test_function_jsdoc_tags() {
        let function = FunctionSpec::new("bet")
            .doc("Brain extraction.")
            .param(ArgSpec::new("infile", TypeRef::string()).doc("Input\nimage."))
            .returns(TypeRef::named("BetOutputs"))
            .return_doc("Object of outputs.");
        assert_eq!(
            function_jsdoc(&function),
            "Brain extraction.\n\n@param infile Input image.\n@returns Object of outputs."
        );
    }
}
