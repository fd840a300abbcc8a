//! Generation units
//!
//! A [`Section`] emits a block of lines for a schema: fixed lines before and
//! after, plus whatever its [`SignalPrinter`] produces for each signal, in
//! declaration order. Sections know nothing about files; see
//! [`crate::codegen::file`] for that.

use crate::signals::{SignalDefinition, SignalSchema};

/// One level of indentation in generated code
pub const INDENT_UNIT: &str = "    ";

/// Prefix a line with `level` indent units (empty lines stay empty)
pub fn indent_line(line: &str, level: usize) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{}", INDENT_UNIT.repeat(level), line)
    }
}

/// Anything that renders a block of lines for a whole schema
pub trait CodegenUnit {
    fn generate(&self, schema: &SignalSchema) -> Vec<String>;
}

/// Produces the lines for one signal
///
/// `index` is the zero-based position of the signal in declaration order.
pub trait SignalPrinter {
    fn print(&self, index: usize, signal: &SignalDefinition) -> Vec<String>;
}

/// Printer that contributes nothing per signal
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignalLines;

impl SignalPrinter for NoSignalLines {
    fn print(&self, _index: usize, _signal: &SignalDefinition) -> Vec<String> {
        Vec::new()
    }
}

impl<F> SignalPrinter for F
where
    F: Fn(usize, &SignalDefinition) -> Vec<String>,
{
    fn print(&self, index: usize, signal: &SignalDefinition) -> Vec<String> {
        self(index, signal)
    }
}

/// A block of generated code repeated once per signal
pub struct Section {
    printer: Box<dyn SignalPrinter>,
    indent: usize,
    /// Lines before the loop, never indented
    init_lines: Vec<String>,
    /// Lines before the loop, indented
    init_indent_lines: Vec<String>,
    /// Lines after the loop, indented
    end_indent_lines: Vec<String>,
    /// Lines after the loop, never indented
    end_lines: Vec<String>,
    /// Blank line between multi-line signal blocks
    item_separation: bool,
}

impl Section {
    /// Create a section around a per-signal printer
    pub fn new(printer: impl SignalPrinter + 'static) -> Self {
        Self {
            printer: Box::new(printer),
            indent: 0,
            init_lines: Vec::new(),
            init_indent_lines: Vec::new(),
            end_indent_lines: Vec::new(),
            end_lines: Vec::new(),
            item_separation: true,
        }
    }

    /// Create a section of fixed lines only
    pub fn fixed<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(NoSignalLines).with_init_lines(lines)
    }

    /// Builder method: indent level applied to indented and per-signal lines
    pub fn with_indent(mut self, level: usize) -> Self {
        self.indent = level;
        self
    }

    /// Builder method: enable or disable blank lines between signal blocks
    pub fn with_item_separation(mut self, enabled: bool) -> Self {
        self.item_separation = enabled;
        self
    }

    pub fn with_init_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.init_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_init_indent_lines<S: Into<String>>(
        mut self,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        self.init_indent_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_end_indent_lines<S: Into<String>>(
        mut self,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        self.end_indent_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_end_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.end_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Render the section against a schema
    pub fn render(&self, schema: &SignalSchema) -> Vec<String> {
        let mut lines = Vec::new();

        lines.extend(self.init_lines.iter().cloned());
        lines.extend(self.init_indent_lines.iter().map(|l| indent_line(l, self.indent)));

        for (i, signal) in schema.iter().enumerate() {
            let signal_lines = self.printer.print(i, signal);

            if i > 0 && signal_lines.len() > 1 && self.item_separation {
                lines.push(String::new());
            }

            lines.extend(signal_lines.iter().map(|l| indent_line(l, self.indent)));
        }

        lines.extend(self.end_indent_lines.iter().map(|l| indent_line(l, self.indent)));
        lines.extend(self.end_lines.iter().cloned());

        lines
    }
}

impl CodegenUnit for Section {
    fn generate(&self, schema: &SignalSchema) -> Vec<String> {
        self.render(schema)
    }
}
