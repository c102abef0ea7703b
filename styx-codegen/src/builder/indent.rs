//! Indentation unit of a target language.

const SPACES: &str = "        ";

/// Width of one indentation level, in spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    pub const PYTHON: Self = Self(4);
    pub const TYPESCRIPT: Self = Self(2);

    /// Widths above 8 are clamped.
    pub const fn spaces(width: u8) -> Self {
        Self(if width > 8 { 8 } else { width })
    }

    pub fn as_str(&self) -> &'static str {
        &SPACES[..usize::from(self.0)]
    }

    /// Prefix every non-empty line with one indent level.
    ///
    /// Providers use this to nest statement buffers inside blocks.
    pub fn indent_lines(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| match line.is_empty() {
                true => line,
                false => format!("{}{}", self.as_str(), line),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_widths() {
        assert_eq!(Indent::PYTHON.as_str(), "    ");
        assert_eq!(Indent::TYPESCRIPT.as_str(), "  ");
        assert_eq!(Indent::spaces(12).as_str().len(), 8);
    }

    #[test]
    fn test_indent_lines_keeps_blank_lines() {
        let lines = Indent::TYPESCRIPT.indent_lines(vec!["a;".into(), String::new(), "b;".into()]);
        assert_eq!(lines, vec!["  a;", "", "  b;"]);
    }
}
