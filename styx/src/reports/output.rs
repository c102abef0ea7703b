//! Output sink for rendering reports.

/// Where a rendered line belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    /// Errors and warnings.
    Stderr,
}

/// Target output for reports.
///
/// Reports describe *what* to print through the provided methods; an
/// implementation only decides where finished lines go.
pub trait Output {
    fn emit(&mut self, stream: Stream, line: String);

    fn list_item(&mut self, text: &str) {
        self.emit(Stream::Stdout, format!("  - {}", text));
    }

    /// A module that was written.
    fn added_item(&mut self, text: &str) {
        self.emit(Stream::Stdout, format!("  + {}", text));
    }

    fn error(&mut self, msg: &str) {
        self.emit(Stream::Stderr, format!("error: {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.emit(Stream::Stderr, format!("warning: {}", msg));
    }

    /// Labelled separator above a previewed module.
    fn divider(&mut self, label: &str) {
        self.emit(Stream::Stdout, format!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.emit(Stream::Stdout, text.to_string());
    }

    fn newline(&mut self) {
        self.emit(Stream::Stdout, String::new());
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the process's stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn emit(&mut self, stream: Stream, line: String) {
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

/// Output capturing rendered lines, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn emit(&mut self, _stream: Stream, line: String) {
        self.lines.push(line);
    }
}
