//! Indentation-tracking text buffer used by the printer.

#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_unit: String,
    indent_level: u32,
    at_line_start: bool,
}

impl SourceWriter {
    #[must_use]
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_unit: " ".repeat(indent_width),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Write text, indenting first if at the start of a line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_unit);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// End the current line unless already at the start of one.
    pub fn ensure_line(&mut self) {
        if !self.at_line_start {
            self.write_line();
        }
    }

    /// Emit an empty line, never more than one in a row.
    pub fn blank_line(&mut self) {
        self.ensure_line();
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.write_line();
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    #[must_use]
    pub const fn indent_level(&self) -> u32 {
        self.indent_level
    }

    #[must_use]
    pub fn finish(mut self) -> String {
        self.ensure_line();
        self.output
    }
}
