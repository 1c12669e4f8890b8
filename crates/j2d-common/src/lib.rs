//! Common types and utilities for the j2d translator.
//!
//! This crate provides foundational types used across all j2d crates:
//! - Diagnostics reported by the rewrite passes (`Diagnostic`, `DiagnosticCategory`)
//! - Source locations carried over from the origin tree (`SourceLocation`)
//! - The destination-language reserved words (`keywords`)

// Diagnostics for non-fatal findings (bounded-pattern misses, skipped rewrites)
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes, format_message};

// Line/column locations in origin compilation units
pub mod position;
pub use position::SourceLocation;

// Dart reserved words and identifier validation
pub mod keywords;
pub use keywords::{is_reserved_word, is_valid_identifier};
