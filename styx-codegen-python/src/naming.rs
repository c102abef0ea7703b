//! Python-specific naming conventions.

use styx_codegen::language::NamingConvention;
use styx_core::{to_pascal_case, to_screaming_snake_case, to_snake_case};

/// Python naming conventions (PEP 8).
pub const PY_NAMING: NamingConvention = NamingConvention {
    var_case: to_snake_case,
    type_case: to_pascal_case,
    constant_case: to_screaming_snake_case,
    file_case: to_snake_case,
    reserved_words: &[
        // Keywords
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
        // Soft keywords
        "match", "case", "type",
        // Builtins generated code relies on
        "self", "str", "int", "float", "bool", "list", "dict", "set", "tuple", "len", "object",
        "print", "range", "hasattr", "isinstance", "super",
    ],
    underscore_fields: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_py_naming_var() {
        assert_eq!(PY_NAMING.var_name("in-file"), "in_file");
        assert_eq!(PY_NAMING.var_name("maskThreshold"), "mask_threshold");
    }

    #[test]
    fn test_py_naming_type() {
        assert_eq!(PY_NAMING.type_name("bet_outputs"), "BetOutputs");
        assert_eq!(PY_NAMING.constant_name("bet_metadata"), "BET_METADATA");
    }

    #[test]
    fn test_py_naming_file() {
        assert_eq!(PY_NAMING.file_name("FSL"), "fsl");
        assert_eq!(PY_NAMING.file_name("3dcalc"), "_3dcalc");
    }

    #[test]
    fn test_py_reserved_words() {
        assert!(PY_NAMING.is_reserved("lambda"));
        assert!(PY_NAMING.is_reserved("None"));
        assert!(!PY_NAMING.is_reserved("infile"));
    }
}
