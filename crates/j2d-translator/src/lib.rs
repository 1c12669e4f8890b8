//! Java to Dart translation engine.
//!
//! Three stages run over one merged program:
//! - [`translate`]: the structural translator, one origin node shape to one
//!   destination shape, with every identifier registered on the context
//! - [`passes`]: whole-program semantic rewrites, strictly in order
//! - printing, through [`j2d_dart::DartPrinter`]
//!
//! [`pipeline::translate_program`] drives all three.

// Occurrence registry, name tables and constructor descriptions
pub mod context;
pub use context::{ClassRecord, ConstructorSite, OutputUnit, TranslationContext};

// Fatal errors
pub mod error;
pub use error::{Result, TranslateError};

// Library type and member knowledge
pub mod library;

// Semantic rewrite passes
pub mod passes;
pub use passes::{RewritePass, default_passes, run_passes};

// Whole-program driver
pub mod pipeline;
pub use pipeline::{OutputFile, TranslateOptions, Translation, translate_program};

// Structural translation
pub mod translate;
pub use translate::StructuralTranslator;
