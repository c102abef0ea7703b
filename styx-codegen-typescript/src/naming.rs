//! TypeScript-specific naming conventions.

use styx_codegen::language::NamingConvention;
use styx_core::{to_camel_case, to_pascal_case, to_screaming_snake_case, to_snake_case};

/// TypeScript naming conventions.
pub const TS_NAMING: NamingConvention = NamingConvention {
    // Variables and fields use camelCase
    var_case: to_camel_case,
    // Types use PascalCase
    type_case: to_pascal_case,
    constant_case: to_screaming_snake_case,
    // Module files keep the Python package layout
    file_case: to_snake_case,
    reserved_words: &[
        // JavaScript reserved words
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "let",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        // TypeScript reserved words
        "any",
        "as",
        "async",
        "await",
        "boolean",
        "constructor",
        "declare",
        "get",
        "implements",
        "interface",
        "module",
        "namespace",
        "never",
        "number",
        "object",
        "package",
        "private",
        "protected",
        "public",
        "readonly",
        "require",
        "set",
        "static",
        "string",
        "symbol",
        "type",
        "undefined",
        "unknown",
        // Globals generated code relies on
        "arguments",
        "eval",
        "Array",
        "Boolean",
        "Number",
        "Object",
        "String",
    ],
    underscore_fields: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_naming_type() {
        assert_eq!(TS_NAMING.type_name("hello-world"), "HelloWorld");
        assert_eq!(TS_NAMING.type_name("bet_Outputs"), "BetOutputs");
    }

    #[test]
    fn test_ts_naming_var() {
        assert_eq!(TS_NAMING.var_name("user_name"), "userName");
        assert_eq!(TS_NAMING.var_name("in-file"), "inFile");
    }

    #[test]
    fn test_ts_naming_file() {
        assert_eq!(TS_NAMING.file_name("HelloWorld"), "hello_world");
    }

    #[test]
    fn test_ts_reserved_words() {
        assert!(TS_NAMING.is_reserved("class"));
        assert!(TS_NAMING.is_reserved("constructor"));
        assert!(!TS_NAMING.is_reserved("hello"));
    }
}
