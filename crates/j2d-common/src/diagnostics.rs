//! Diagnostic types for non-fatal translation findings.
//!
//! Fatal problems abort the run through `TranslateError` in `j2d-translator`.
//! Everything a pass deliberately leaves untouched is reported here instead, so
//! the front end can surface it without failing the translation.

use crate::position::SourceLocation;
use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const FIELD_INITIALIZER_NOT_EXTRACTED: u32 = 1001;
    pub const SETTER_CALL_NOT_IN_STATEMENT: u32 = 1002;
    pub const CONSTRUCTOR_WITHOUT_BINDING: u32 = 1003;
    pub const UNRESOLVED_VARARGS_CALL: u32 = 1004;
    pub const CASE_FALLTHROUGH: u32 = 1005;
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::FIELD_INITIALIZER_NOT_EXTRACTED,
        category: DiagnosticCategory::Warning,
        message: "Initializer of field '{0}' depends on the instance in a form that is not extracted; left in place.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::SETTER_CALL_NOT_IN_STATEMENT,
        category: DiagnosticCategory::Message,
        message: "Method '{0}' is not converted to a setter because its result is used.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_WITHOUT_BINDING,
        category: DiagnosticCategory::Warning,
        message: "Constructor of class '{0}' has no binding and cannot be renamed.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNRESOLVED_VARARGS_CALL,
        category: DiagnosticCategory::Warning,
        message: "Call to '{0}' has no resolved binding; arguments are passed unchanged.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CASE_FALLTHROUGH,
        category: DiagnosticCategory::Warning,
        message: "Switch case in '{0}' falls through; Dart requires every non-empty case to end.",
    },
];

/// A translation diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a warning diagnostic from a registered code and its arguments.
    #[must_use]
    pub fn warning(code: u32, args: &[&str], location: Option<SourceLocation>) -> Self {
        let category = get_diagnostic_category(code).unwrap_or(DiagnosticCategory::Warning);
        let message_text = get_message_template(code)
            .map(|template| format_message(template, args))
            .unwrap_or_else(|| args.join(" "));
        Self {
            category,
            code,
            location,
            message_text,
        }
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
