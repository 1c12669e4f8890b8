//! j2d: Java to Dart source translation.
//!
//! The engine lives in the workspace crates; this package re-exports them and
//! carries the command-line front end.
//!
//! ```text
//! resolver dumps (*.json) ──cli::driver──▶ ResolvedProgram
//!     ──j2d_translator::translate_program──▶ Translation { files, diagnostics }
//! ```

pub use j2d_common as common;
pub use j2d_dart as dart;
pub use j2d_java as java;
pub use j2d_translator as translator;

pub use j2d_common::{Diagnostic, DiagnosticCategory, SourceLocation};
pub use j2d_java::ResolvedProgram;
pub use j2d_translator::{
    OutputFile, TranslateError, TranslateOptions, Translation, translate_program,
};

// Command-line front end
pub mod cli;

// Subscriber setup driven by J2D_LOG / J2D_LOG_FORMAT
pub mod tracing_config;
