//! Indentation-aware text buffer used by the renderers.

use super::Indent;

/// Line-oriented source buffer.
///
/// Lines pushed while indented get the current indentation prepended;
/// blank lines never carry trailing whitespace.
///
/// # Example
///
/// ```
/// use styx_codegen::builder::CodeBuilder;
///
/// let mut code = CodeBuilder::python();
/// code.push_line("def bet(infile: InputPathType):")
///     .push_nested(|body| {
///         body.push_line("cargs = []");
///     })
///     .push_line("");
///
/// assert_eq!(code.build(), "def bet(infile: InputPathType):\n    cargs = []\n\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent: Indent,
    depth: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn python() -> Self {
        Self::new(Indent::PYTHON)
    }

    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.push_blank();
        }
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Push each line at the current indentation.
    ///
    /// Provider output (`LineBuffer`) arrives here already indented relative
    /// to its first line.
    pub fn push_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> &mut Self {
        for line in lines {
            self.push_line(line.as_ref());
        }
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Run `f` one level deeper, restoring the depth afterwards.
    pub fn push_nested(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_indent();
        f(self);
        self.push_dedent()
    }

    /// Single-line `/** ... */` comment.
    pub fn push_jsdoc(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("/** {} */", text))
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        let unit = self.indent.as_str();
        self.buffer.reserve(unit.len() * self.depth);
        for _ in 0..self.depth {
            self.buffer.push_str(unit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_fields() {
        let mut builder = CodeBuilder::python();
        builder
            .push_line("class BetMaskOpts:")
            .push_indent()
            .push_lines(&["threshold: float", "mask: bool"])
            .push_dedent()
            .push_line("x = 1");
        assert_eq!(
            builder.build(),
            "class BetMaskOpts:\n    threshold: float\n    mask: bool\nx = 1\n"
        );
    }

    #[test]
    fn test_blank_line_is_unindented() {
        let mut builder = CodeBuilder::typescript();
        builder.push_indent().push_line("").push_line("a;");
        assert_eq!(builder.build(), "\n  a;\n");
    }

    #[test]
    fn test_push_nested_restores_depth() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line("if (x) {")
            .push_nested(|b| {
                b.push_line("y();");
            })
            .push_line("}");
        assert_eq!(builder.build(), "if (x) {\n  y();\n}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::python();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.as_str(), "x\n");
    }

    #[test]
    fn test_jsdoc() {
        let mut builder = CodeBuilder::typescript();
        builder.push_indent().push_jsdoc("Output root folder.");
        assert_eq!(builder.as_str(), "  /** Output root folder. */\n");
    }
}
