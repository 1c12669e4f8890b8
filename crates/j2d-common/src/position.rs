//! Source locations for origin-tree nodes.
//!
//! The resolver attaches a 1-based line/column to nodes it can locate. Locations
//! are only used for reporting, never for layout: the printer is layout-canonical.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position, optionally qualified by the origin file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub file: Option<String>,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Attach the compilation-unit path when the resolver left it out.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        if self.file.is_none() {
            self.file = Some(file.into());
        }
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}
