//! Dart reserved words.
//!
//! These seed the translation context's forbidden-name set. Built-in identifiers
//! such as `get` and `operator` are valid member names and are not listed.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

pub const RESERVED_WORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

static RESERVED_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| RESERVED_WORDS.iter().copied().collect());

/// Check whether `name` is a Dart reserved word.
#[must_use]
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_SET.contains(name)
}

/// Check whether `name` is usable as a Dart identifier.
///
/// Accepts `[A-Za-z_$][A-Za-z0-9_$]*` that is not a reserved word.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !is_reserved_word(name)
}

#[cfg(test)]
#[path = "../tests/keywords_tests.rs"]
mod tests;
