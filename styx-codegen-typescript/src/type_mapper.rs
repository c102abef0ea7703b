//! TypeScript type annotations.

use styx_codegen::builder::{PrimitiveType, TypeMapper};
use styx_ir::DefaultValue;

use crate::provider::{TypeScriptProvider, ts_literal};

impl TypeMapper for TypeScriptProvider {
    fn map_primitive(&self, ty: PrimitiveType) -> String {
        match ty {
            PrimitiveType::String => "string",
            PrimitiveType::Int => "number",
            PrimitiveType::Float => "number",
            PrimitiveType::Bool => "boolean",
            PrimitiveType::InputPath => "InputPathType",
            PrimitiveType::OutputPath => "OutputPathType",
            PrimitiveType::Runner => "Runner",
            PrimitiveType::Execution => "Execution",
        }
        .to_string()
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("{} | null", inner)
    }

    fn map_array(&self, inner: &str) -> String {
        if inner.contains(' ') {
            format!("({})[]", inner)
        } else {
            format!("{}[]", inner)
        }
    }

    fn map_union(&self, members: &[String]) -> String {
        members.join(" | ")
    }

    fn map_literal(&self, values: &[DefaultValue]) -> String {
        values.iter().map(ts_literal).collect::<Vec<_>>().join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use styx_codegen::builder::TypeRef;

    use super::*;

    #[test]
    fn test_typescript_primitives() {
        let ts = TypeScriptProvider::new();

        assert_eq!(ts.render_type(&TypeRef::string()), "string");
        assert_eq!(ts.render_type(&TypeRef::int()), "number");
        assert_eq!(ts.render_type(&TypeRef::float()), "number");
        assert_eq!(ts.render_type(&TypeRef::bool()), "boolean");
    }

    #[test]
    fn test_typescript_composite_types() {
        let ts = TypeScriptProvider::new();

        assert_eq!(
            ts.render_type(&TypeRef::optional(TypeRef::array(TypeRef::int()))),
            "number[] | null"
        );
        assert_eq!(
            ts.render_type(&TypeRef::array(TypeRef::optional(TypeRef::named("A")))),
            "(A | null)[]"
        );
        assert_eq!(
            ts.render_type(&TypeRef::Literal(vec!["a".into(), DefaultValue::Int(1)])),
            "\"a\" | 1"
        );
    }
}
