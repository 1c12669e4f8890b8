use colored::Colorize;

use j2d_common::{Diagnostic, DiagnosticCategory};

/// Renders translation diagnostics for a terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `file:line:col - warning J2D1001: message`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = match &diagnostic.location {
            Some(location) => self.format_location(&location.to_string()),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// One-line tally printed after the diagnostics.
    pub fn summary(&self, files: usize, diagnostics: &[Diagnostic]) -> String {
        let warnings = diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count();
        let noun = if files == 1 { "file" } else { "files" };
        let line = format!("Translated {files} {noun} with {warnings} warning(s).");
        if self.color && warnings > 0 {
            line.yellow().to_string()
        } else if self.color {
            line.green().to_string()
        } else {
            line
        }
    }

    fn format_location(&self, location: &str) -> String {
        if self.color {
            location.cyan().to_string()
        } else {
            location.to_string()
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("J2D{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
