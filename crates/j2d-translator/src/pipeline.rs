//! Whole-program driver: structural translation, rewrite passes, printing.
//!
//! ```text
//! ResolvedProgram ──prepare──▶ TranslationContext ──passes──▶ render ──▶ Vec<OutputFile>
//! ```
//!
//! Fatal errors abort the run before any text is produced.

use crate::context::TranslationContext;
use crate::error::{Result, TranslateError};
use crate::passes::{default_passes, run_passes};
use crate::translate::StructuralTranslator;
use indexmap::IndexMap;
use j2d_common::{Diagnostic, is_reserved_word, is_valid_identifier};
use j2d_dart::{DEFAULT_INDENT_WIDTH, DartPrinter};
use j2d_java::ResolvedProgram;
use tracing::{debug, info, info_span};

/// Knobs the front end passes through to the engine.
#[derive(Clone, Debug)]
pub struct TranslateOptions {
    /// Signature string to new name.
    pub renames: IndexMap<String, String>,
    pub convert_accessors: bool,
    pub indent_width: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            renames: IndexMap::new(),
            convert_accessors: false,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// One printed output unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// Relative path with a `.dart` extension.
    pub path: String,
    pub text: String,
}

/// Result of a successful run.
#[derive(Debug, Default)]
pub struct Translation {
    pub files: Vec<OutputFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// Reject rename entries that could never produce valid output.
pub fn validate_renames(renames: &IndexMap<String, String>) -> Result<()> {
    for (signature, name) in renames {
        if signature.trim().is_empty() {
            return Err(TranslateError::Configuration(format!(
                "rename to `{name}` has an empty signature"
            )));
        }
        if is_reserved_word(name) {
            return Err(TranslateError::Configuration(format!(
                "rename of `{signature}` targets the reserved word `{name}`"
            )));
        }
        if !is_valid_identifier(name) {
            return Err(TranslateError::Configuration(format!(
                "rename of `{signature}` targets `{name}`, which is not a valid identifier"
            )));
        }
    }
    Ok(())
}

/// Structurally translate every unit of `program` into a fresh context.
pub fn prepare(program: ResolvedProgram, options: &TranslateOptions) -> Result<TranslationContext> {
    validate_renames(&options.renames)?;
    let ResolvedProgram { bindings, units } = program;
    let mut ctx = TranslationContext::with_renames(bindings, options.renames.clone());
    for unit in &units {
        StructuralTranslator::new(&mut ctx).translate_unit(unit)?;
    }
    debug!(
        units = ctx.units.len(),
        classes = ctx.classes.len(),
        "structural translation finished"
    );
    Ok(ctx)
}

/// Print every output unit of `ctx`.
#[must_use]
pub fn render(ctx: &TranslationContext, indent_width: usize) -> Vec<OutputFile> {
    ctx.units
        .iter()
        .map(|unit| OutputFile {
            path: unit.path.clone(),
            text: DartPrinter::emit_to_string(&ctx.arena, unit.root, indent_width),
        })
        .collect()
}

/// Translate a whole program.
pub fn translate_program(program: ResolvedProgram, options: &TranslateOptions) -> Result<Translation> {
    let _span = info_span!("translate_program", units = program.units.len()).entered();
    let mut ctx = prepare(program, options)?;
    let mut passes = default_passes(options.convert_accessors);
    run_passes(&mut ctx, &mut passes)?;
    let files = render(&ctx, options.indent_width);
    let diagnostics = ctx.take_diagnostics();
    info!(
        files = files.len(),
        diagnostics = diagnostics.len(),
        "translation finished"
    );
    Ok(Translation { files, diagnostics })
}
