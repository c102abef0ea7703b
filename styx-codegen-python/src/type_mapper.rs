//! Python type annotations.

use styx_codegen::builder::{PrimitiveType, TypeMapper};
use styx_ir::DefaultValue;

use crate::provider::{PythonProvider, python_literal};

impl TypeMapper for PythonProvider {
    fn map_primitive(&self, ty: PrimitiveType) -> String {
        match ty {
            PrimitiveType::String => "str",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Bool => "bool",
            PrimitiveType::InputPath => "InputPathType",
            PrimitiveType::OutputPath => "OutputPathType",
            PrimitiveType::Runner => "Runner",
            PrimitiveType::Execution => "Execution",
        }
        .to_string()
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("{} | None", inner)
    }

    fn map_array(&self, inner: &str) -> String {
        format!("list[{}]", inner)
    }

    fn map_union(&self, members: &[String]) -> String {
        members.join(" | ")
    }

    fn map_literal(&self, values: &[DefaultValue]) -> String {
        let values: Vec<String> = values.iter().map(python_literal).collect();
        format!("typing.Literal[{}]", values.join(", "))
    }
}
