//! Naming conventions for different programming languages.

use styx_core::sanitize_identifier;

/// Language-specific naming conventions.
///
/// Defines how descriptor names become identifiers. Collisions with
/// reserved words are not escaped here: the words seed every base scope,
/// so the allocator dodges them like any other taken name.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a name to a variable/field name (e.g., "in-file" -> "in_file")
    pub var_case: fn(&str) -> String,
    /// Transform a name to a type name (e.g., "bet_outputs" -> "BetOutputs")
    pub type_case: fn(&str) -> String,
    /// Transform a name to a constant name (e.g., "bet_metadata" -> "BET_METADATA")
    pub constant_case: fn(&str) -> String,
    /// Transform a path component to a module file name
    pub file_case: fn(&str) -> String,
    /// Keywords and builtins of the language
    pub reserved_words: &'static [&'static str],
    /// Whether output record fields may start with `_` (`typing.NamedTuple` refuses them)
    pub underscore_fields: bool,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Transform and make legal for use as a variable or field name.
    pub fn var_name(&self, name: &str) -> String {
        sanitize_identifier(&(self.var_case)(name))
    }

    /// Variable name usable as an output record field.
    ///
    /// Where the target refuses leading underscores, names that would start
    /// with one get a `v` prefix (`3d_mask` -> `v_3d_mask`).
    pub fn record_field_name(&self, name: &str) -> String {
        let field = self.var_name(name);
        match !self.underscore_fields && field.starts_with('_') {
            true => format!("v{}", field),
            false => field,
        }
    }

    /// Transform and make legal for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        sanitize_identifier(&(self.type_case)(name))
    }

    /// Transform and make legal for use as a constant name.
    pub fn constant_name(&self, name: &str) -> String {
        sanitize_identifier(&(self.constant_case)(name))
    }

    /// Transform for use as a module file or directory name.
    pub fn file_name(&self, name: &str) -> String {
        sanitize_identifier(&(self.file_case)(name))
    }
}

#[cfg(test)]
mod tests {
    use styx_core::{to_pascal_case, to_screaming_snake_case, to_snake_case};

    use super::*;

    const SNAKE: NamingConvention = NamingConvention {
        var_case: to_snake_case,
        type_case: to_pascal_case,
        constant_case: to_screaming_snake_case,
        file_case: to_snake_case,
        reserved_words: &["class", "def"],
        underscore_fields: false,
    };

    #[test]
    fn test_names_are_sanitized() {
        assert_eq!(SNAKE.var_name("3d-calc"), "_3d_calc");
        assert_eq!(SNAKE.type_name("3dcalc"), "_3dcalc");
        assert_eq!(SNAKE.constant_name("bet_METADATA"), "BET_METADATA");
        assert_eq!(SNAKE.file_name("FSL BET"), "fsl_bet");
    }

    #[test]
    fn test_reserved_words_pass_through() {
        assert!(SNAKE.is_reserved("class"));
        assert_eq!(SNAKE.var_name("class"), "class");
    }

    #[test]
    fn test_record_fields_avoid_leading_underscore() {
        assert_eq!(SNAKE.record_field_name("3d_mask"), "v_3d_mask");
        assert_eq!(SNAKE.record_field_name("_hidden"), "v_hidden");
        assert_eq!(SNAKE.record_field_name("mask"), "mask");

        let permissive = NamingConvention {
            underscore_fields: true,
            ..SNAKE
        };
        assert_eq!(permissive.record_field_name("3d_mask"), "_3d_mask");
    }
}
